//! Data-driven game balance
//!
//! Two presets ship with the game. `Classic` is the forgiving original
//! layout (a fixed handful of small asteroids); `Normal` scales the field
//! with the viewport and makes explosions denser.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Balance preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Classic,
    #[default]
    Normal,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Classic => "Classic",
            Difficulty::Normal => "Normal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "easy" => Some(Difficulty::Classic),
            "normal" => Some(Difficulty::Normal),
            _ => None,
        }
    }
}

/// How many asteroids a populate call seeds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AsteroidCount {
    Fixed { count: u32 },
    /// `clamp(min, max, area / area_per_asteroid)`
    ByArea {
        min: u32,
        max: u32,
        area_per_asteroid: f32,
    },
}

/// Sub-population sizes for one explosion, derived from a base count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionTuning {
    pub large_shards_min: u32,
    pub large_shards_ratio: f32,
    pub smoke_min: u32,
    pub smoke_max: u32,
    pub sparks_min: u32,
    pub sparks_ratio: f32,
    pub small_shards_min: u32,
    pub small_shards_ratio: f32,
}

/// Planet boost timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostTuning {
    pub multiplier: f32,
    pub duration_secs: f32,
    pub cooldown_secs: f32,
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub asteroid_count: AsteroidCount,
    /// Asteroid radius range (px)
    pub asteroid_size: (f32, f32),
    /// Fall speed range (px per 60 Hz frame)
    pub asteroid_speed: (f32, f32),
    /// Craters per asteroid (inclusive)
    pub crater_count: (u32, u32),
    /// Background shots: `max(shots_min, width / shots_width_divisor)`
    pub shots_min: u32,
    pub shots_width_divisor: f32,
    pub explosion: ExplosionTuning,
    pub boost: BoostTuning,
    /// Hit radius as a multiple of asteroid size
    pub hit_slack: f32,
    /// Base count for a pointer hit: `max(hit_base_min, round(size * hit_base_per_size))`
    pub hit_base_min: u32,
    pub hit_base_per_size: f32,
    /// Base count for the keyboard "clear nearest" command
    pub key_clear_base_count: u32,
    /// Keyboard reach as a fraction of viewport height
    pub key_clear_radius_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

impl Tuning {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Classic => Self {
                asteroid_count: AsteroidCount::Fixed { count: 8 },
                asteroid_size: (18.0, 36.0),
                asteroid_speed: (0.8, 2.4),
                crater_count: (2, 4),
                shots_min: 4,
                shots_width_divisor: 400.0,
                explosion: ExplosionTuning {
                    large_shards_min: 5,
                    large_shards_ratio: 0.35,
                    smoke_min: 2,
                    smoke_max: 3,
                    sparks_min: 8,
                    sparks_ratio: 0.5,
                    small_shards_min: 6,
                    small_shards_ratio: 0.9,
                },
                boost: BoostTuning {
                    multiplier: 1.9,
                    duration_secs: 5.0,
                    cooldown_secs: 8.0,
                },
                hit_slack: 1.05,
                hit_base_min: 12,
                hit_base_per_size: 1.2,
                key_clear_base_count: 14,
                key_clear_radius_ratio: 0.6,
            },
            Difficulty::Normal => Self {
                asteroid_count: AsteroidCount::ByArea {
                    min: 6,
                    max: 40,
                    area_per_asteroid: 90_000.0,
                },
                asteroid_size: (18.0, 48.0),
                asteroid_speed: (0.8, 2.4),
                crater_count: (2, 5),
                shots_min: 6,
                shots_width_divisor: 300.0,
                explosion: ExplosionTuning {
                    large_shards_min: 6,
                    large_shards_ratio: 0.35,
                    smoke_min: 2,
                    smoke_max: 4,
                    sparks_min: 10,
                    sparks_ratio: 0.6,
                    small_shards_min: 8,
                    small_shards_ratio: 0.9,
                },
                boost: BoostTuning {
                    multiplier: 1.9,
                    duration_secs: 6.0,
                    cooldown_secs: 9.0,
                },
                hit_slack: 1.05,
                hit_base_min: 12,
                hit_base_per_size: 1.2,
                key_clear_base_count: 14,
                key_clear_radius_ratio: 0.6,
            },
        }
    }

    /// Parse a balance table from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min_size, max_size) = self.asteroid_size;
        if !(min_size > 0.0 && min_size <= max_size) {
            return Err(ConfigError::invalid(
                "asteroid_size",
                format!("expected 0 < min <= max, got ({min_size}, {max_size})"),
            ));
        }
        let (min_speed, max_speed) = self.asteroid_speed;
        if !(min_speed >= 0.0 && min_speed <= max_speed) {
            return Err(ConfigError::invalid(
                "asteroid_speed",
                format!("expected 0 <= min <= max, got ({min_speed}, {max_speed})"),
            ));
        }
        if self.crater_count.0 > self.crater_count.1 {
            return Err(ConfigError::invalid("crater_count", "min exceeds max"));
        }
        match self.asteroid_count {
            AsteroidCount::Fixed { count } if count == 0 => {
                return Err(ConfigError::invalid("asteroid_count", "must be positive"));
            }
            AsteroidCount::ByArea {
                min,
                max,
                area_per_asteroid,
            } => {
                if min == 0 || min > max {
                    return Err(ConfigError::invalid(
                        "asteroid_count",
                        format!("expected 0 < min <= max, got ({min}, {max})"),
                    ));
                }
                if area_per_asteroid <= 0.0 {
                    return Err(ConfigError::invalid(
                        "asteroid_count",
                        "area_per_asteroid must be positive",
                    ));
                }
            }
            _ => {}
        }
        if self.shots_width_divisor <= 0.0 {
            return Err(ConfigError::invalid(
                "shots_width_divisor",
                "must be positive",
            ));
        }
        if self.explosion.smoke_min > self.explosion.smoke_max {
            return Err(ConfigError::invalid("explosion.smoke", "min exceeds max"));
        }
        if self.boost.multiplier <= 0.0
            || self.boost.duration_secs <= 0.0
            || self.boost.cooldown_secs < 0.0
        {
            return Err(ConfigError::invalid(
                "boost",
                "multiplier and duration must be positive, cooldown non-negative",
            ));
        }
        if self.hit_slack <= 0.0 {
            return Err(ConfigError::invalid("hit_slack", "must be positive"));
        }
        Ok(())
    }

    /// Asteroid population for a viewport
    pub fn asteroid_count(&self, width: f32, height: f32) -> usize {
        match self.asteroid_count {
            AsteroidCount::Fixed { count } => count as usize,
            AsteroidCount::ByArea {
                min,
                max,
                area_per_asteroid,
            } => {
                let by_area = (width * height / area_per_asteroid).floor().max(0.0) as u32;
                by_area.clamp(min, max) as usize
            }
        }
    }

    /// Background shot population for a viewport width
    pub fn shot_count(&self, width: f32) -> usize {
        let by_width = (width / self.shots_width_divisor).floor().max(0.0) as u32;
        by_width.max(self.shots_min) as usize
    }

    /// Explosion base count for an asteroid of the given size
    pub fn hit_base_count(&self, size: f32) -> u32 {
        crate::round_count(size * self.hit_base_per_size).max(self.hit_base_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(Tuning::for_difficulty(Difficulty::Classic).validate().is_ok());
        assert!(Tuning::for_difficulty(Difficulty::Normal).validate().is_ok());
    }

    #[test]
    fn test_asteroid_count_by_area() {
        let t = Tuning::for_difficulty(Difficulty::Normal);
        // Tiny viewport clamps up to the minimum
        assert_eq!(t.asteroid_count(320.0, 480.0), 6);
        // 1920x1080 = 2_073_600 / 90_000 = 23.04
        assert_eq!(t.asteroid_count(1920.0, 1080.0), 23);
        // Huge viewport clamps down to the maximum
        assert_eq!(t.asteroid_count(8000.0, 8000.0), 40);
    }

    #[test]
    fn test_asteroid_count_fixed() {
        let t = Tuning::for_difficulty(Difficulty::Classic);
        assert_eq!(t.asteroid_count(320.0, 480.0), 8);
        assert_eq!(t.asteroid_count(4000.0, 3000.0), 8);
    }

    #[test]
    fn test_shot_count() {
        let normal = Tuning::for_difficulty(Difficulty::Normal);
        assert_eq!(normal.shot_count(800.0), 6);
        assert_eq!(normal.shot_count(2400.0), 8);
        let classic = Tuning::for_difficulty(Difficulty::Classic);
        assert_eq!(classic.shot_count(800.0), 4);
        assert_eq!(classic.shot_count(2000.0), 5);
    }

    #[test]
    fn test_hit_base_count() {
        let t = Tuning::default();
        assert_eq!(t.hit_base_count(5.0), 12);
        assert_eq!(t.hit_base_count(20.0), 24);
        assert_eq!(t.hit_base_count(36.0), 43);
    }

    #[test]
    fn test_json_round_trip_and_validation() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());

        let mut broken = Tuning::default();
        broken.asteroid_size = (40.0, 20.0);
        let json = serde_json::to_string(&broken).unwrap();
        let err = Tuning::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "asteroid_size",
                ..
            }
        ));

        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Classic));
        assert_eq!(Difficulty::from_str("normal"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }
}

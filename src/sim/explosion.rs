//! Hit testing and explosion synthesis
//!
//! Sub-population sizes follow fixed ratios of a base count; everything
//! per-particle (direction, speed, size, life) is randomized.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::color::Rgba;
use super::effects::{Ripple, Shard, Smoke, Spark};
use super::population::Populations;
use super::rng::GameRng;
use crate::consts::EXPLOSION_RIPPLE_LIFE;
use crate::tuning::ExplosionTuning;

/// Positional jitter so bursts are not perfectly concentric
const SHARD_JITTER: f32 = 6.0;
const SMOKE_JITTER: f32 = 8.0;
const SPARK_JITTER: f32 = 4.0;

/// How many particles of each kind one explosion produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplosionCounts {
    pub large_shards: u32,
    pub smoke: u32,
    pub sparks: u32,
    pub small_shards: u32,
}

impl ExplosionCounts {
    pub fn derive(base_count: u32, rng: &mut GameRng, tuning: &ExplosionTuning) -> Self {
        let b = base_count as f32;
        // Epsilon keeps e.g. 20 * 0.35 from flooring to 6 in f32
        let ratio = |r: f32| (b * r + 1e-4).floor().max(0.0) as u32;
        Self {
            large_shards: ratio(tuning.large_shards_ratio).max(tuning.large_shards_min),
            smoke: rng.range_int(tuning.smoke_min, tuning.smoke_max),
            sparks: ratio(tuning.sparks_ratio).max(tuning.sparks_min),
            small_shards: ratio(tuning.small_shards_ratio).max(tuning.small_shards_min),
        }
    }

    pub fn shards(&self) -> u32 {
        self.large_shards + self.small_shards
    }
}

/// Index of the asteroid under `point`, preferring the most recently
/// spawned one when several overlap.
pub fn hit_test(asteroids: &[Asteroid], point: Vec2, slack: f32) -> Option<usize> {
    asteroids
        .iter()
        .enumerate()
        .rev()
        .find(|(_, a)| a.pos.distance(point) < a.size * slack)
        .map(|(i, _)| i)
}

/// Index of the asteroid closest to `center`, if it lies within `reach`
pub fn nearest_to(asteroids: &[Asteroid], center: Vec2, reach: f32) -> Option<usize> {
    let (index, dist_sq) = asteroids
        .iter()
        .enumerate()
        .map(|(i, a)| (i, a.pos.distance_squared(center)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))?;
    (dist_sq <= reach * reach).then_some(index)
}

/// Spawn a full burst at `pos`: large shards, smoke, sparks, a second wave
/// of small shards and one ripple.
pub fn explode(
    populations: &mut Populations,
    rng: &mut GameRng,
    pos: Vec2,
    color: Rgba,
    base_count: u32,
    tuning: &ExplosionTuning,
) -> ExplosionCounts {
    let counts = ExplosionCounts::derive(base_count, rng, tuning);

    for _ in 0..counts.large_shards {
        let at = pos + jitter(rng, SHARD_JITTER);
        populations.shards.push(Shard::spawn(rng, at, color));
    }
    for _ in 0..counts.smoke {
        let at = pos + jitter(rng, SMOKE_JITTER);
        let base_radius = rng.range(8.0, 26.0);
        populations.smoke.push(Smoke::spawn(rng, at, base_radius));
    }
    for _ in 0..counts.sparks {
        let at = pos + jitter(rng, SPARK_JITTER);
        populations.sparks.push(Spark::spawn(rng, at));
    }
    for _ in 0..counts.small_shards {
        let at = pos + jitter(rng, SHARD_JITTER);
        populations.shards.push(Shard::spawn(rng, at, color));
    }
    populations
        .ripples
        .push(Ripple::new(pos, EXPLOSION_RIPPLE_LIFE));

    counts
}

fn jitter(rng: &mut GameRng, amount: f32) -> Vec2 {
    Vec2::new(rng.jitter(amount), rng.jitter(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::color::palette;
    use crate::tuning::{Difficulty, Tuning};

    #[test]
    fn test_hit_test_radius() {
        let asteroids = vec![Asteroid::at(Vec2::new(100.0, 100.0), 20.0)];
        assert_eq!(hit_test(&asteroids, Vec2::new(105.0, 103.0), 1.05), Some(0));
        assert_eq!(hit_test(&asteroids, Vec2::new(200.0, 200.0), 1.05), None);
        // Inside the 5% slack but outside the body
        assert_eq!(hit_test(&asteroids, Vec2::new(120.5, 100.0), 1.05), Some(0));
        assert_eq!(hit_test(&asteroids, Vec2::new(121.0, 100.0), 1.05), None);
    }

    #[test]
    fn test_hit_test_prefers_latest() {
        let asteroids = vec![
            Asteroid::at(Vec2::new(100.0, 100.0), 20.0),
            Asteroid::at(Vec2::new(110.0, 100.0), 20.0),
        ];
        assert_eq!(hit_test(&asteroids, Vec2::new(105.0, 100.0), 1.05), Some(1));
    }

    #[test]
    fn test_nearest_to_respects_reach() {
        let asteroids = vec![
            Asteroid::at(Vec2::new(100.0, 100.0), 20.0),
            Asteroid::at(Vec2::new(380.0, 290.0), 20.0),
        ];
        let center = Vec2::new(400.0, 300.0);
        assert_eq!(nearest_to(&asteroids, center, 360.0), Some(1));
        assert_eq!(nearest_to(&asteroids, center, 10.0), None);
        assert_eq!(nearest_to(&[], center, 1000.0), None);
    }

    #[test]
    fn test_counts_for_base_twenty() {
        let tuning = Tuning::for_difficulty(Difficulty::Normal).explosion;
        let mut rng = GameRng::from_seed(3);
        for _ in 0..50 {
            let counts = ExplosionCounts::derive(20, &mut rng, &tuning);
            assert_eq!(counts.large_shards, 7);
            assert!((2..=4).contains(&counts.smoke));
            assert_eq!(counts.sparks, 12);
            assert_eq!(counts.small_shards, 18);
        }
    }

    #[test]
    fn test_counts_floor_at_minimums() {
        let tuning = Tuning::for_difficulty(Difficulty::Classic).explosion;
        let mut rng = GameRng::from_seed(3);
        let counts = ExplosionCounts::derive(1, &mut rng, &tuning);
        assert_eq!(counts.large_shards, 5);
        assert_eq!(counts.sparks, 8);
        assert_eq!(counts.small_shards, 6);
        assert!((2..=3).contains(&counts.smoke));
    }

    #[test]
    fn test_explode_populates_every_kind() {
        let tuning = Tuning::for_difficulty(Difficulty::Normal).explosion;
        let mut rng = GameRng::from_seed(44);
        let mut pops = Populations::new();
        let origin = Vec2::new(300.0, 200.0);
        let counts = explode(&mut pops, &mut rng, origin, palette::ASTEROID_TINTS[2], 20, &tuning);

        assert_eq!(pops.shards.len() as u32, counts.shards());
        assert_eq!(pops.shards.len(), 25);
        assert_eq!(pops.smoke.len() as u32, counts.smoke);
        assert_eq!(pops.sparks.len(), 12);
        assert_eq!(pops.ripples.len(), 1);
        assert_eq!(pops.ripples[0].origin, origin);

        for s in &pops.shards {
            assert!(s.pos.distance(origin) <= 6.0 * std::f32::consts::SQRT_2 + 1e-3);
            assert_eq!(s.color, palette::ASTEROID_TINTS[2]);
        }
        for s in &pops.sparks {
            assert!(s.pos.distance(origin) <= 4.0 * std::f32::consts::SQRT_2 + 1e-3);
        }
    }
}

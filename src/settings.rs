//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tuning::{Difficulty, Tuning};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Background stars drawn each frame
    pub fn star_count(&self) -> u32 {
        match self {
            QualityPreset::Low => 20,
            QualityPreset::Medium => 40,
            QualityPreset::High => 60,
        }
    }

    /// Segments used to tessellate a full circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 20,
            QualityPreset::High => 32,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Balance preset
    pub difficulty: Difficulty,
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Audio ===
    pub muted: bool,
    /// Explosion cue volume (0.0 - 1.0)
    pub volume: f32,

    /// Fixed RNG seed; random per run when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            quality: QualityPreset::Medium,
            muted: false,
            volume: 0.08,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "save_mars_settings";

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::invalid(
                "volume",
                format!("expected 0.0..=1.0, got {}", self.volume),
            ));
        }
        Ok(())
    }

    /// Balance table for the selected difficulty
    pub fn tuning(&self) -> Tuning {
        Tuning::for_difficulty(self.difficulty)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.difficulty, Difficulty::Normal);
        assert_eq!(s.quality.star_count(), 40);
        assert_eq!(s.volume, 0.08);
        assert!(!s.muted);
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings {
            difficulty: Difficulty::Classic,
            quality: QualityPreset::High,
            muted: true,
            volume: 0.5,
            seed: Some(99),
        };
        let json = s.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"muted": true}"#).unwrap();
        assert!(s.muted);
        assert_eq!(s.quality, QualityPreset::Medium);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_rejects_bad_volume_and_malformed_json() {
        let err = Settings::from_json(r#"{"volume": 3.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "volume", .. }));
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_tuning_follows_difficulty() {
        let s = Settings {
            difficulty: Difficulty::Classic,
            ..Default::default()
        };
        assert_eq!(s.tuning().boost.duration_secs, 5.0);
    }

    #[test]
    fn test_quality_from_str() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }
}

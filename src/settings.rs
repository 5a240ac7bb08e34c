//! Game tuning and preferences
//!
//! Read from the container's `data-settings` JSON attribute on web. Every field
//! is optional in the JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed (random per session when absent)
    pub seed: Option<u64>,

    // === Player ===
    /// Pixels per movement unit
    pub player_speed: f32,

    // === Enemies ===
    /// Enemy speed at level 1 (pixels per frame)
    pub base_enemy_speed: f32,
    /// Speed added per level
    pub enemy_speed_step: f32,
    /// Seconds per level
    pub level_interval_secs: u64,

    // === Collision ===
    /// Hit boxes are divided by this before the overlap test
    pub hit_box_shrink: f32,

    // === Host ===
    /// Delay before the score prompt appears after a collision
    pub score_prompt_delay_ms: u32,
    /// `s` starts and `r` resets the game
    pub keyboard_shortcuts: bool,
    /// Log filter (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            player_speed: 20.0,

            base_enemy_speed: 1.75,
            enemy_speed_step: 0.25,
            level_interval_secs: 10,

            hit_box_shrink: 1.1,

            score_prompt_delay_ms: 500,
            keyboard_shortcuts: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings, falling back to defaults on any problem
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        if json.is_none_or(|j| j.trim().is_empty()) {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::from_json_opt(json) {
            (settings, Some(e)) => {
                log::warn!("{e}; using default settings");
                settings
            }
            (settings, None) => {
                log::info!("Loaded settings from container attribute");
                settings
            }
        }
    }

    /// Like [`Settings::from_json_or_default`] but hands the error back
    /// instead of logging it. Absent or blank JSON is not an error.
    pub fn from_json_opt(json: Option<&str>) -> (Self, Option<SettingsError>) {
        let Some(json) = json.filter(|j| !j.trim().is_empty()) else {
            return (Self::default(), None);
        };
        match Self::from_json(json) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |field: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        };
        positive("player_speed", self.player_speed)?;
        positive("base_enemy_speed", self.base_enemy_speed)?;
        positive("hit_box_shrink", self.hit_box_shrink)?;
        if !self.enemy_speed_step.is_finite() || self.enemy_speed_step < 0.0 {
            return Err(SettingsError::Invalid {
                field: "enemy_speed_step",
                reason: "must not be negative",
            });
        }
        if self.level_interval_secs == 0 {
            return Err(SettingsError::Invalid {
                field: "level_interval_secs",
                reason: "must be at least one second",
            });
        }
        Ok(())
    }

    /// Parsed log filter, `Info` when unrecognized
    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "player_speed": 30 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.player_speed, 30.0);
        assert_eq!(settings.base_enemy_speed, 1.75);
        assert_eq!(settings.score_prompt_delay_ms, 500);
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "hit_box_shrink": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "hit_box_shrink",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "level_interval_secs": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("level_interval_secs"));
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(Settings::from_json_or_default(None), Settings::default());
        assert_eq!(
            Settings::from_json_or_default(Some("not json")),
            Settings::default()
        );
        assert_eq!(
            Settings::from_json_or_default(Some(r#"{"seed": 3}"#)).seed,
            Some(3)
        );
    }

    #[test]
    fn test_from_json_opt_returns_error() {
        let (settings, err) = Settings::from_json_opt(Some("   "));
        assert_eq!(settings, Settings::default());
        assert!(err.is_none());

        let (settings, err) = Settings::from_json_opt(Some(r#"{ "player_speed": -1 }"#));
        assert_eq!(settings, Settings::default());
        assert!(matches!(
            err,
            Some(SettingsError::Invalid {
                field: "player_speed",
                ..
            })
        ));

        let (settings, err) = Settings::from_json_opt(Some(r#"{ "log_level": "debug" }"#));
        assert_eq!(settings.log_filter(), log::LevelFilter::Debug);
        assert!(err.is_none());
    }

    #[test]
    fn test_log_filter() {
        let mut settings = Settings::default();
        assert_eq!(settings.log_filter(), log::LevelFilter::Info);
        settings.log_level = "debug".into();
        assert_eq!(settings.log_filter(), log::LevelFilter::Debug);
        settings.log_level = "loud".into();
        assert_eq!(settings.log_filter(), log::LevelFilter::Info);
    }
}

//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Initial contents of the minutes/seconds fields
//! - Completion flash timing
//! - Completion tone parameters
//!
//! Configuration is stored at `~/.config/countdown/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::config_dir;
use crate::error::ConfigError;
use crate::timer::DurationInput;

/// Initial input values for a new session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerDefaults {
    #[serde(default)]
    pub default_minutes: u32,
    #[serde(default)]
    pub default_seconds: u32,
}

/// Completion flash configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

/// Completion tone configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f32,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_start_gain")]
    pub start_gain: f32,
    #[serde(default = "default_end_gain")]
    pub end_gain: f32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/countdown/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerDefaults,
    #[serde(default)]
    pub flash: FlashConfig,
    #[serde(default)]
    pub sound: SoundConfig,
}

/// Longest flash hold, flash fade or tone the alerts will play.
pub const MAX_ALERT_MS: u64 = 60_000;

// Default functions
fn default_true() -> bool {
    true
}
fn default_opacity() -> f32 {
    0.8
}
fn default_hold_ms() -> u64 {
    200
}
fn default_fade_ms() -> u64 {
    500
}
fn default_frequency_hz() -> f32 {
    800.0
}
fn default_duration_ms() -> u64 {
    1000
}
fn default_start_gain() -> f32 {
    0.3
}
fn default_end_gain() -> f32 {
    0.01
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: default_opacity(),
            hold_ms: default_hold_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_hz: default_frequency_hz(),
            duration_ms: default_duration_ms(),
            start_gain: default_start_gain(),
            end_gain: default_end_gain(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut parent = root;
        if let Some(path) = parent_path {
            for part in path.split('.') {
                parent = parent.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = parent.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;
        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                } else {
                    return Err(invalid(format!("cannot parse '{value}' as number")));
                }
            }
            serde_json::Value::Object(_) => return Err(unknown()),
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults there if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values the alerts cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };
        if !(0.0..=1.0).contains(&self.flash.opacity) {
            return Err(invalid("flash.opacity", "must be between 0 and 1"));
        }
        for (key, value) in [
            ("sound.frequency_hz", self.sound.frequency_hz),
            ("sound.start_gain", self.sound.start_gain),
            ("sound.end_gain", self.sound.end_gain),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(key, "must be positive and finite"));
            }
        }
        for (key, ms) in [
            ("flash.hold_ms", self.flash.hold_ms),
            ("flash.fade_ms", self.flash.fade_ms),
            ("sound.duration_ms", self.sound.duration_ms),
        ] {
            if ms > MAX_ALERT_MS {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must be at most {MAX_ALERT_MS} ms"),
                });
            }
        }
        Ok(())
    }

    /// Input fields pre-filled from `[timer]`.
    pub fn initial_input(&self) -> DurationInput {
        DurationInput::from_values(self.timer.default_minutes, self.timer.default_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::InputSource;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.timer.default_minutes, 0);
        assert_eq!(cfg.timer.default_seconds, 0);
        assert!(cfg.flash.enabled);
        assert_eq!(cfg.flash.opacity, 0.8);
        assert_eq!(cfg.flash.hold_ms, 200);
        assert_eq!(cfg.flash.fade_ms, 500);
        assert!(cfg.sound.enabled);
        assert_eq!(cfg.sound.frequency_hz, 800.0);
        assert_eq!(cfg.sound.duration_ms, 1000);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[timer]\ndefault_minutes = 5\n").unwrap();
        assert_eq!(cfg.timer.default_minutes, 5);
        assert_eq!(cfg.sound, SoundConfig::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("flash.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("flash.hold_ms").as_deref(), Some("200"));
        assert!(cfg.get("flash.missing_key").is_none());
        assert!(cfg.get("flash").is_none());
    }

    #[test]
    fn set_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.set("timer.default_seconds", "45").unwrap();
        assert_eq!(cfg.timer.default_seconds, 45);
        cfg.set("sound.frequency_hz", "440.5").unwrap();
        assert_eq!(cfg.sound.frequency_hz, 440.5);
    }

    #[test]
    fn set_updates_nested_bool() {
        let mut cfg = Config::default();
        cfg.set("sound.enabled", "false").unwrap();
        assert!(!cfg.sound.enabled);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("flash.color", "red"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("flash.enabled", "not_a_bool").is_err());
        assert!(cfg.set("flash.hold_ms", "soon").is_err());
    }

    #[test]
    fn set_rejects_out_of_range_and_keeps_old_value() {
        let mut cfg = Config::default();
        assert!(cfg.set("flash.opacity", "1.5").is_err());
        assert!(cfg.set("sound.end_gain", "0").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_alert_durations_over_a_minute() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("flash.hold_ms", "100000000"),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "flash.hold_ms"
        ));
        assert!(cfg.set("flash.hold_ms", &u64::MAX.to_string()).is_err());
        assert!(cfg.set("flash.fade_ms", "60001").is_err());
        assert!(cfg.set("sound.duration_ms", "3600000").is_err());
        assert_eq!(cfg, Config::default());

        cfg.set("flash.hold_ms", &MAX_ALERT_MS.to_string()).unwrap();
        assert_eq!(cfg.flash.hold_ms, MAX_ALERT_MS);
    }

    #[test]
    fn set_rejects_infinite_frequency() {
        let mut cfg = Config::default();
        assert!(cfg.set("sound.frequency_hz", "1e40").is_err());
        assert_eq!(cfg.sound.frequency_hz, 800.0);
    }

    #[test]
    fn load_from_rejects_oversized_hold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[flash]\nhold_ms = 100000000\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn initial_input_uses_timer_defaults() {
        let mut cfg = Config::default();
        cfg.timer.default_minutes = 3;
        cfg.timer.default_seconds = 20;
        let input = cfg.initial_input();
        assert_eq!(input.minutes(), 3);
        assert_eq!(input.seconds(), 20);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("flash.fade_ms", "900").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().flash.fade_ms, 900);
    }

    #[test]
    fn load_from_rejects_broken_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "flash = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}

mod config;

pub use config::{Config, FlashConfig, SoundConfig, TimerDefaults};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/countdown[-dev]/` based on COUNTDOWN_ENV.
///
/// Set COUNTDOWN_ENV=dev to use the development directory, or
/// COUNTDOWN_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("COUNTDOWN_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join(".config");
            let env = std::env::var("COUNTDOWN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("countdown-dev")
            } else {
                base_dir.join("countdown")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

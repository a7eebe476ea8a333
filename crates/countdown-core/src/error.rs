//! Core error types for countdown-core.
//!
//! Timer transitions never fail; errors here come from the ambient layers
//! around the state machine (configuration files and the audio alert).

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not determine where the configuration lives
    #[error("Cannot determine configuration directory")]
    NoConfigDir,
}

/// Errors raised while preparing or playing an alert.
///
/// These never reach the timer: the controller logs and drops them.
#[derive(Error, Debug)]
pub enum AlertError {
    /// Tone parameters the synthesiser cannot honour
    #[error("Invalid tone: {0}")]
    InvalidTone(String),

    /// No usable audio output
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),
}

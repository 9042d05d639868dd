//! Configuration errors.

use thiserror::Error;

/// Invalid values read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{raw}'")]
    InvalidPort { raw: String },

    #[error("HOST is not a valid IP address: '{raw}'")]
    InvalidHost { raw: String },

    #[error("BASE must start with '/', got '{raw}'")]
    InvalidBase { raw: String },
}

impl ConfigError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidPort { .. } => "E_CONFIG_PORT",
            ConfigError::InvalidHost { .. } => "E_CONFIG_HOST",
            ConfigError::InvalidBase { .. } => "E_CONFIG_BASE",
        }
    }
}

use thiserror::Error;

use crate::config::SecretError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid setting '{setting_name}' = '{value}': {reason}")]
    InvalidSetting {
        setting_name: String,
        value: String,
        reason: String,
    },

    #[error("Setting '{setting_name}' must not be empty")]
    EmptySetting { setting_name: String },

    #[error(transparent)]
    Secret(#[from] SecretError),
}

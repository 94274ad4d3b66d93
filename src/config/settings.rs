use std::path::PathBuf;

use crate::config::{ConfigError, EnvironmentProvider};
use crate::stores::IdAllocation;

pub const DEFAULT_DATA_FILE: &str = "visa_applications.json";
pub const DEFAULT_USER_FILE: &str = "user_data.json";
pub const DEFAULT_SEQUENCE_FILE: &str = "visa_sequence.json";

/// Locations of the record files and the id allocation scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Application records (`VISA_DATA_FILE`)
    pub data_file: PathBuf,
    /// User accounts (`USER_DATA_FILE`)
    pub user_file: PathBuf,
    /// Monotonic id counter (`SEQUENCE_FILE`)
    pub sequence_file: PathBuf,
    /// `ID_ALLOCATION`: `monotonic` (default) or `count`
    pub id_allocation: IdAllocation,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            user_file: PathBuf::from(DEFAULT_USER_FILE),
            sequence_file: PathBuf::from(DEFAULT_SEQUENCE_FILE),
            id_allocation: IdAllocation::default(),
        }
    }
}

impl AppSettings {
    /// Load settings from environment variables, falling back to defaults
    pub fn from_env(env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let id_allocation = match env.get_var("ID_ALLOCATION") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::InvalidSetting {
                setting_name: "ID_ALLOCATION".to_string(),
                value: raw.clone(),
                reason,
            })?,
            None => defaults.id_allocation,
        };

        Ok(Self {
            data_file: path_setting(env, "VISA_DATA_FILE")?.unwrap_or(defaults.data_file),
            user_file: path_setting(env, "USER_DATA_FILE")?.unwrap_or(defaults.user_file),
            sequence_file: path_setting(env, "SEQUENCE_FILE")?.unwrap_or(defaults.sequence_file),
            id_allocation,
        })
    }
}

fn path_setting(env: &dyn EnvironmentProvider, name: &str) -> Result<Option<PathBuf>, ConfigError> {
    match env.get_var(name) {
        Some(raw) if raw.trim().is_empty() => Err(ConfigError::EmptySetting {
            setting_name: name.to_string(),
        }),
        Some(raw) => Ok(Some(PathBuf::from(raw))),
        None => Ok(None),
    }
}

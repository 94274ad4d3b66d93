use std::fmt;

use thiserror::Error;

use crate::config::EnvironmentProvider;

/// Environment variable holding the password pepper
pub const PEPPER_VAR: &str = "PASSWORD_PEPPER";

/// Minimum accepted pepper length
pub const MIN_PEPPER_LENGTH: usize = 16;

/// Pepper used when `PASSWORD_PEPPER` is unset
///
/// Stored hashes and fingerprints are only valid under the pepper they were
/// created with, so this value must never change.
const DEVELOPMENT_PEPPER: &str = "visa-facilitator-development-pepper";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SecretError {
    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

/// Centralized manager for application secrets
pub struct SecretManager {
    password_pepper: String,
}

impl SecretManager {
    /// Load and validate all secrets
    ///
    /// # Errors
    /// Returns `SecretError` if a configured secret fails validation
    pub fn init(env: &dyn EnvironmentProvider) -> Result<Self, SecretError> {
        let password_pepper = match env.get_var(PEPPER_VAR) {
            Some(pepper) if pepper.len() < MIN_PEPPER_LENGTH => {
                return Err(SecretError::InvalidLength {
                    secret_name: PEPPER_VAR.to_string(),
                    expected: MIN_PEPPER_LENGTH,
                    actual: pepper.len(),
                });
            }
            Some(pepper) => pepper,
            None => {
                tracing::warn!("{} is not set; using the built-in development pepper", PEPPER_VAR);
                DEVELOPMENT_PEPPER.to_string()
            }
        };

        Ok(Self { password_pepper })
    }

    /// Get the pepper for password hashing and fingerprinting
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

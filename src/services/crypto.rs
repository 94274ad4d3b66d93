use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::InternalError;

type HmacSha256 = Hmac<Sha256>;

/// Password hashing and fingerprinting keyed by the application pepper
///
/// Hashes are salted Argon2id and can only be verified. Fingerprints are an
/// unsalted HMAC-SHA256 so two accounts with the same password produce the
/// same value, which is what the registry-wide uniqueness rule compares.
pub struct CredentialHasher {
    pepper: String,
    params: Params,
}

impl CredentialHasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self::with_params(pepper, Params::default())
    }

    /// Custom Argon2 cost parameters (tests use the minimum)
    pub fn with_params(pepper: impl Into<String>, params: Params) -> Self {
        Self {
            pepper: pepper.into(),
            params,
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a password into a PHC string
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Check a password against a stored PHC string
    ///
    /// An unparseable stored hash never verifies.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, InternalError> {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                return Ok(false);
            }
        };
        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Deterministic keyed digest of a password, as lowercase hex
    pub fn fingerprint(&self, password: &str) -> Result<String, InternalError> {
        let mut mac = HmacSha256::new_from_slice(self.pepper.as_bytes())
            .map_err(|e| InternalError::crypto("hmac_init", e.to_string()))?;
        mac.update(password.as_bytes());
        Ok(format!("{:x}", mac.finalize().into_bytes()))
    }
}

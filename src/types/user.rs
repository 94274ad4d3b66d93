use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Actor role; part of the credential, not just a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "User" => Ok(Role::User),
            "Admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// A persisted user account, keyed by username
///
/// Accounts written by the legacy tool carry only a plaintext `password`
/// and a `user_type`. They stay readable and are rehashed on first login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Argon2id PHC string; empty for a legacy account
    #[serde(default)]
    pub password_hash: String,
    /// Keyed digest of the password, used for the registry-wide uniqueness rule
    #[serde(default)]
    pub password_fingerprint: String,
    #[serde(rename = "password", default, skip_serializing_if = "Option::is_none")]
    pub legacy_password: Option<String>,
    #[serde(alias = "user_type")]
    pub role: Role,
}

impl UserAccount {
    /// Account still holding a plaintext password from a legacy file
    pub fn is_legacy(&self) -> bool {
        self.legacy_password.is_some()
    }
}

/// The authenticated actor of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

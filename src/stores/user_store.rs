use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::InternalError;
use crate::stores::RecordStore;
use crate::types::UserAccount;

/// Identity registry persistence: user accounts keyed by username
pub struct UserStore {
    records: Arc<dyn RecordStore<UserAccount>>,
}

impl UserStore {
    pub fn new(records: Arc<dyn RecordStore<UserAccount>>) -> Self {
        Self { records }
    }

    pub fn load_all(&self) -> Result<BTreeMap<String, UserAccount>, InternalError> {
        Ok(self.records.load()?)
    }

    pub fn save_all(&self, accounts: &BTreeMap<String, UserAccount>) -> Result<(), InternalError> {
        Ok(self.records.save(accounts)?)
    }

    pub fn get(&self, username: &str) -> Result<Option<UserAccount>, InternalError> {
        Ok(self.load_all()?.remove(username))
    }
}

/// Any account in `accounts` already uses this password
///
/// Hashed accounts are matched on `fingerprint`; legacy accounts on their
/// plaintext password.
pub fn password_in_use(
    accounts: &BTreeMap<String, UserAccount>,
    password: &str,
    fingerprint: &str,
) -> bool {
    accounts.values().any(|account| match &account.legacy_password {
        Some(legacy) => legacy == password,
        None => account.password_fingerprint == fingerprint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn hashed(fingerprint: &str) -> UserAccount {
        UserAccount {
            password_hash: "hash".to_string(),
            password_fingerprint: fingerprint.to_string(),
            legacy_password: None,
            role: Role::User,
        }
    }

    fn legacy(password: &str) -> UserAccount {
        UserAccount {
            password_hash: String::new(),
            password_fingerprint: String::new(),
            legacy_password: Some(password.to_string()),
            role: Role::User,
        }
    }

    #[test]
    fn test_password_in_use_matches_fingerprints_and_plaintext() {
        let accounts = BTreeMap::from([
            ("alice".to_string(), hashed("fp-alice")),
            ("carol".to_string(), legacy("pw-carol")),
        ]);

        assert!(password_in_use(&accounts, "anything", "fp-alice"));
        assert!(password_in_use(&accounts, "pw-carol", "fp-new"));
        assert!(!password_in_use(&accounts, "pw-new", "fp-new"));
    }

    #[test]
    fn test_legacy_empty_fingerprint_never_matches() {
        let accounts = BTreeMap::from([("carol".to_string(), legacy("pw-carol"))]);
        assert!(!password_in_use(&accounts, "pw-other", ""));
    }
}

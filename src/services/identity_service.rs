use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::{IdentityError, InternalError, StorageError};
use crate::services::CredentialHasher;
use crate::stores::user_store::{password_in_use, UserStore};
use crate::types::{Identity, OperationContext, Role, UserAccount};

/// Identity registry: account registration and role-bound authentication
///
/// Accounts are immutable once registered. Usernames are unique, and so are
/// passwords across the whole registry.
pub struct IdentityService {
    user_store: Arc<UserStore>,
    hasher: Arc<CredentialHasher>,
    write_lock: Mutex<()>,
}

impl IdentityService {
    pub fn new(user_store: Arc<UserStore>, hasher: Arc<CredentialHasher>) -> Self {
        Self {
            user_store,
            hasher,
            write_lock: Mutex::new(()),
        }
    }

    /// Register a new account
    ///
    /// Checks in order (fail fast):
    /// 1. Username not already registered
    /// 2. No existing account uses the same password
    ///
    /// # Returns
    /// * `Ok(())` - Account created and user store rewritten
    /// * `Err(InternalError::Identity)` - DuplicateUsername or DuplicatePassword
    /// * `Err(InternalError)` - Storage or hashing failure
    pub fn register(
        &self,
        ctx: &OperationContext,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<(), InternalError> {
        let _guard = self.lock("register")?;

        let mut accounts = self.user_store.load_all()?;

        if accounts.contains_key(username) {
            tracing::warn!(request_id = %ctx.request_id, source = %ctx.source, actor = %ctx.actor, username, "Registration rejected: duplicate username");
            return Err(IdentityError::DuplicateUsername {
                username: username.to_string(),
            }
            .into());
        }

        let fingerprint = self.hasher.fingerprint(password)?;
        if password_in_use(&accounts, password, &fingerprint) {
            tracing::warn!(request_id = %ctx.request_id, source = %ctx.source, actor = %ctx.actor, username, "Registration rejected: password already in use");
            return Err(IdentityError::DuplicatePassword.into());
        }

        let account = UserAccount {
            password_hash: self.hasher.hash_password(password)?,
            password_fingerprint: fingerprint,
            legacy_password: None,
            role,
        };
        accounts.insert(username.to_string(), account);
        self.user_store.save_all(&accounts)?;

        tracing::info!(request_id = %ctx.request_id, source = %ctx.source, actor = %ctx.actor, username, %role, "Account registered");
        Ok(())
    }

    /// Verify credentials for the requested role
    ///
    /// Unknown username, wrong password and role mismatch all yield the same
    /// `InvalidCredentials` error. A legacy plaintext account is rehashed
    /// after its first successful login.
    pub fn authenticate(
        &self,
        ctx: &OperationContext,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Identity, InternalError> {
        let account = self.user_store.get(username)?;

        let verified = match &account {
            Some(account) if account.role != role => false,
            Some(UserAccount {
                legacy_password: Some(legacy),
                ..
            }) => legacy == password,
            Some(account) => self.hasher.verify_password(password, &account.password_hash)?,
            None => false,
        };

        if !verified {
            tracing::warn!(request_id = %ctx.request_id, source = %ctx.source, actor = %ctx.actor, username, %role, "Authentication failed");
            return Err(IdentityError::InvalidCredentials.into());
        }

        if account.is_some_and(|account| account.is_legacy()) {
            self.upgrade_legacy_account(ctx, username, password)?;
        }

        tracing::info!(request_id = %ctx.request_id, source = %ctx.source, username, %role, "Authenticated");
        Ok(Identity {
            username: username.to_string(),
            role,
        })
    }

    /// Replace a verified plaintext password with its hash and fingerprint
    fn upgrade_legacy_account(
        &self,
        ctx: &OperationContext,
        username: &str,
        password: &str,
    ) -> Result<(), InternalError> {
        let _guard = self.lock("upgrade_legacy_account")?;

        let mut accounts = self.user_store.load_all()?;
        let Some(account) = accounts.get_mut(username) else {
            return Ok(());
        };
        if account.legacy_password.as_deref() != Some(password) {
            return Ok(());
        }

        account.password_hash = self.hasher.hash_password(password)?;
        account.password_fingerprint = self.hasher.fingerprint(password)?;
        account.legacy_password = None;
        self.user_store.save_all(&accounts)?;

        tracing::info!(request_id = %ctx.request_id, source = %ctx.source, username, "Legacy credential rehashed");
        Ok(())
    }

    fn lock(&self, operation: &str) -> Result<MutexGuard<'_, ()>, InternalError> {
        Ok(self
            .write_lock
            .lock()
            .map_err(|_| StorageError::poisoned(operation))?)
    }
}

use std::sync::Arc;

use crate::config::{AppSettings, SecretManager};
use crate::services::{Clock, CredentialHasher, IdentityService, LifecycleService, SystemClock};
use crate::stores::{
    ApplicationStore, IdAllocation, JsonFileStore, MemoryStore, RecordStore, UserStore,
};
use crate::types::{UserAccount, VisaApplication};

/// Record store backends for the three persisted collections
pub struct StoreBackends {
    pub applications: Arc<dyn RecordStore<VisaApplication>>,
    pub sequence: Arc<dyn RecordStore<u32>>,
    pub users: Arc<dyn RecordStore<UserAccount>>,
}

impl StoreBackends {
    /// JSON files at the configured locations
    pub fn json_files(settings: &AppSettings) -> Self {
        Self {
            applications: Arc::new(JsonFileStore::new(&settings.data_file)),
            sequence: Arc::new(JsonFileStore::new(&settings.sequence_file)),
            users: Arc::new(JsonFileStore::new(&settings.user_file)),
        }
    }

    /// Empty in-memory collections
    pub fn in_memory() -> Self {
        Self {
            applications: Arc::new(MemoryStore::new()),
            sequence: Arc::new(MemoryStore::new()),
            users: Arc::new(MemoryStore::new()),
        }
    }
}

/// Centralized application data following the main-owned stores pattern
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ↓ creates once
///   ├─ application_store (Arc<ApplicationStore>)
///   ├─ user_store (Arc<UserStore>)
///   ├─ identity_service (Arc<IdentityService>)
///   └─ lifecycle_service (Arc<LifecycleService>)
///   ↓ borrowed by
///   ├─ cli::execute_command
///   └─ cli::menu::Menu
/// ```
pub struct AppData {
    pub application_store: Arc<ApplicationStore>,
    pub user_store: Arc<UserStore>,
    pub identity_service: Arc<IdentityService>,
    pub lifecycle_service: Arc<LifecycleService>,
}

impl AppData {
    /// File-backed application data with the system clock
    pub fn init(settings: &AppSettings, secret_manager: &SecretManager) -> Self {
        tracing::info!(
            data_file = %settings.data_file.display(),
            user_file = %settings.user_file.display(),
            id_allocation = ?settings.id_allocation,
            "Initializing AppData..."
        );

        let app_data = Self::build(
            StoreBackends::json_files(settings),
            settings.id_allocation,
            CredentialHasher::new(secret_manager.password_pepper()),
            Arc::new(SystemClock),
        );

        tracing::info!("AppData initialization complete");
        app_data
    }

    /// Wire stores and services over arbitrary backends
    pub fn build(
        backends: StoreBackends,
        id_allocation: IdAllocation,
        hasher: CredentialHasher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let application_store = Arc::new(ApplicationStore::new(
            backends.applications,
            backends.sequence,
            id_allocation,
        ));
        let user_store = Arc::new(UserStore::new(backends.users));

        let identity_service = Arc::new(IdentityService::new(user_store.clone(), Arc::new(hasher)));
        let lifecycle_service = Arc::new(LifecycleService::new(application_store.clone(), clock));

        Self {
            application_store,
            user_store,
            identity_service,
            lifecycle_service,
        }
    }
}

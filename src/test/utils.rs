// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use argon2::Params;
use chrono::{NaiveDate, NaiveDateTime};

use crate::app_data::{AppData, StoreBackends};
use crate::services::{CredentialHasher, FixedClock};
use crate::stores::IdAllocation;
use crate::types::{NewApplication, OperationContext};

/// Instant every test clock is frozen at
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid test instant")
}

/// Hasher with minimum Argon2 cost so tests stay fast
pub fn fast_hasher() -> CredentialHasher {
    let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
        .expect("minimum argon2 params are valid");
    CredentialHasher::with_params("test-pepper-for-unit-tests", params)
}

/// In-memory AppData with monotonic ids and a frozen clock
pub fn setup_test_app_data() -> Arc<AppData> {
    setup_test_app_data_with(IdAllocation::Monotonic)
}

pub fn setup_test_app_data_with(id_allocation: IdAllocation) -> Arc<AppData> {
    Arc::new(AppData::build(
        StoreBackends::in_memory(),
        id_allocation,
        fast_hasher(),
        Arc::new(FixedClock::at(test_now())),
    ))
}

pub fn test_ctx() -> OperationContext {
    OperationContext::for_system("test")
}

/// The reference submission: Alice from Nepal
pub fn alice() -> NewApplication {
    NewApplication {
        name: "Alice".to_string(),
        passport_number: "1234567890".to_string(),
        nationality: "Nepal".to_string(),
        university: "XYZ University".to_string(),
        visa_type: "Student".to_string(),
    }
}

pub fn submission(name: &str, passport_number: &str) -> NewApplication {
    NewApplication {
        name: name.to_string(),
        passport_number: passport_number.to_string(),
        ..alice()
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

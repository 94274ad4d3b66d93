// Common test utilities for integration tests
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use argon2::Params;
use chrono::{NaiveDate, NaiveDateTime};

use visa_facilitator::app_data::{AppData, StoreBackends};
use visa_facilitator::config::AppSettings;
use visa_facilitator::services::{CredentialHasher, FixedClock};
use visa_facilitator::stores::IdAllocation;
use visa_facilitator::types::{NewApplication, OperationContext};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Instant the test clock is frozen at
pub fn frozen_now() -> NaiveDateTime {
    date(2026, 10, 18).and_hms_opt(9, 30, 0).expect("valid test instant")
}

/// Argon2 hasher at minimum cost
pub fn fast_hasher() -> CredentialHasher {
    let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
        .expect("minimum argon2 params are valid");
    CredentialHasher::with_params("integration-test-pepper", params)
}

/// In-memory AppData with monotonic ids
pub fn setup_in_memory() -> AppData {
    AppData::build(
        StoreBackends::in_memory(),
        IdAllocation::Monotonic,
        fast_hasher(),
        Arc::new(FixedClock::at(frozen_now())),
    )
}

/// AppData over JSON files inside `dir`
pub fn setup_json_files(dir: &Path, id_allocation: IdAllocation) -> AppData {
    let settings = AppSettings {
        data_file: dir.join("visa_applications.json"),
        user_file: dir.join("user_data.json"),
        sequence_file: dir.join("visa_sequence.json"),
        id_allocation,
    };
    AppData::build(
        StoreBackends::json_files(&settings),
        id_allocation,
        fast_hasher(),
        Arc::new(FixedClock::at(frozen_now())),
    )
}

pub fn ctx() -> OperationContext {
    OperationContext::for_system("integration-test")
}

pub fn application(name: &str, passport_number: &str) -> NewApplication {
    NewApplication {
        name: name.to_string(),
        passport_number: passport_number.to_string(),
        nationality: "Nepal".to_string(),
        university: "XYZ University".to_string(),
        visa_type: "Student".to_string(),
    }
}

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::VisaStatus;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("Application not found!")]
    NotFound { id: String },

    #[error("All fields are required!")]
    MissingFields,

    #[error("Passport number must be exactly 10 digits!")]
    InvalidPassportFormat,

    #[error("Name and Passport Number cannot be the same!")]
    NameEqualsPassport,

    #[error("Passport number already exists in our system!")]
    DuplicatePassport,

    #[error("An application with these exact details already exists!")]
    DuplicateApplication,

    /// Visa is on hold or suspended; `action` names the refused transition
    #[error("Cannot {action}. Visa application is {status}.")]
    Locked {
        action: &'static str,
        status: VisaStatus,
    },

    #[error("Cannot assign interview. Missing required details.")]
    IncompleteProfile,

    #[error("Interview location is required!")]
    MissingLocation,

    #[error("No interview assigned to this application.")]
    NoInterview,

    #[error("Visa is already approved.")]
    AlreadyApproved,

    #[error("No expiry date found for this application.")]
    NoExpiry,

    #[error("Visa is not expired yet. Cannot renew!")]
    NotYetExpired { expiry: NaiveDate },

    #[error("Visa is not approved or is already suspended.")]
    NotApproved,

    #[error("Visa is not suspended.")]
    NotSuspended,

    #[error("Details can only be updated once.")]
    AlreadyUpdated,
}

impl ApplicationError {
    pub fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    pub fn locked(action: &'static str, status: VisaStatus) -> Self {
        Self::Locked { action, status }
    }
}

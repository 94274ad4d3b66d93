use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::request::{DetailsUpdate, NewApplication};

/// Prefix shared by every application identifier
pub const APPLICATION_ID_PREFIX: &str = "APP";

/// Render a sequence number as an application id (`APP0001`, `APP0002`, ...)
pub fn format_application_id(sequence: u32) -> String {
    format!("{}{:04}", APPLICATION_ID_PREFIX, sequence)
}

/// Visa decision state of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisaStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
    /// Only ever set by editing the data file directly
    #[serde(rename = "On Hold")]
    OnHold,
}

impl VisaStatus {
    /// On-hold and suspended visas block interview, decision and renewal transitions
    pub fn is_locked(self) -> bool {
        matches!(self, Self::OnHold | Self::Suspended)
    }

    /// Whether an approve/reject decision may be recorded from this state
    pub fn accepts_decision(self) -> bool {
        matches!(self, Self::Pending | Self::Rejected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Suspended => "Suspended",
            Self::OnHold => "On Hold",
        }
    }
}

impl fmt::Display for VisaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interview progress of an application
///
/// The known states are closed variants; anything else an administrator
/// types is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterviewStatus {
    NotAssigned,
    Assigned,
    Completed,
    Pending,
    Other(String),
}

impl InterviewStatus {
    /// Map raw status text onto a known variant, keeping unknown text as-is
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Not Assigned" => Self::NotAssigned,
            "Assigned" => Self::Assigned,
            "Completed" => Self::Completed,
            "Pending" => Self::Pending,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NotAssigned => "Not Assigned",
            Self::Assigned => "Assigned",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for InterviewStatus {
    fn from(raw: String) -> Self {
        match Self::from_raw(&raw) {
            Self::Other(_) => Self::Other(raw),
            known => known,
        }
    }
}

impl From<InterviewStatus> for String {
    fn from(status: InterviewStatus) -> Self {
        match status {
            InterviewStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the visa has been renewed after expiring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenewStatus {
    #[serde(rename = "not renewed")]
    NotRenewed,
    Renewed,
}

impl fmt::Display for RenewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRenewed => f.write_str("not renewed"),
            Self::Renewed => f.write_str("Renewed"),
        }
    }
}

/// A persisted visa application record, keyed by its application id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaApplication {
    pub name: String,
    pub passport_number: String,
    pub nationality: String,
    pub university: String,
    pub visa_type: String,
    #[serde(default)]
    pub interview_date: Option<NaiveDate>,
    #[serde(default)]
    pub interview_location: Option<String>,
    pub interview_status: InterviewStatus,
    pub visa_status: VisaStatus,
    #[serde(default)]
    pub visa_expiry_date: Option<NaiveDate>,
    #[serde(alias = "Renew status")]
    pub renew_status: RenewStatus,
    #[serde(default)]
    pub details_updated: bool,
}

impl VisaApplication {
    /// Fresh record for a submission that passed validation
    pub fn new(submission: NewApplication) -> Self {
        Self {
            name: submission.name,
            passport_number: submission.passport_number,
            nationality: submission.nationality,
            university: submission.university,
            visa_type: submission.visa_type,
            interview_date: None,
            interview_location: None,
            interview_status: InterviewStatus::NotAssigned,
            visa_status: VisaStatus::Pending,
            visa_expiry_date: None,
            renew_status: RenewStatus::NotRenewed,
            details_updated: false,
        }
    }

    /// Name, passport, nationality and university are all present
    pub fn has_complete_profile(&self) -> bool {
        [
            &self.name,
            &self.passport_number,
            &self.nationality,
            &self.university,
        ]
        .iter()
        .all(|field| !field.is_empty())
    }

    /// Exact match on the five submitted fields
    pub fn matches_submission(&self, submission: &NewApplication) -> bool {
        self.name == submission.name
            && self.passport_number == submission.passport_number
            && self.nationality == submission.nationality
            && self.university == submission.university
            && self.visa_type == submission.visa_type
    }

    /// Overwrite the applicant details and freeze them
    pub fn apply_details(&mut self, update: DetailsUpdate) {
        self.name = update.name;
        self.passport_number = update.passport_number;
        self.nationality = update.nationality;
        self.university = update.university;
        self.details_updated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> NewApplication {
        NewApplication {
            name: "Alice".to_string(),
            passport_number: "1234567890".to_string(),
            nationality: "Nepal".to_string(),
            university: "XYZ University".to_string(),
            visa_type: "Student".to_string(),
        }
    }

    #[test]
    fn test_format_application_id_pads_to_four_digits() {
        assert_eq!(format_application_id(1), "APP0001");
        assert_eq!(format_application_id(42), "APP0042");
        assert_eq!(format_application_id(12345), "APP12345");
    }

    #[test]
    fn test_new_application_defaults() {
        let app = VisaApplication::new(submission());
        assert_eq!(app.visa_status, VisaStatus::Pending);
        assert_eq!(app.interview_status, InterviewStatus::NotAssigned);
        assert_eq!(app.renew_status, RenewStatus::NotRenewed);
        assert!(!app.details_updated);
        assert!(app.interview_date.is_none());
        assert!(app.interview_location.is_none());
        assert!(app.visa_expiry_date.is_none());
    }

    #[test]
    fn test_locked_statuses() {
        assert!(VisaStatus::OnHold.is_locked());
        assert!(VisaStatus::Suspended.is_locked());
        assert!(!VisaStatus::Pending.is_locked());
        assert!(!VisaStatus::Approved.is_locked());
        assert!(!VisaStatus::Rejected.is_locked());
    }

    #[test]
    fn test_interview_status_keeps_unknown_text() {
        assert_eq!(InterviewStatus::from_raw("Completed"), InterviewStatus::Completed);
        assert_eq!(
            InterviewStatus::from_raw("Rescheduled"),
            InterviewStatus::Other("Rescheduled".to_string())
        );
        assert_eq!(String::from(InterviewStatus::NotAssigned), "Not Assigned");
    }

    #[test]
    fn test_serialized_shape() {
        let mut app = VisaApplication::new(submission());
        app.visa_expiry_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        let value = serde_json::to_value(&app).unwrap();

        assert_eq!(value["interview_status"], "Not Assigned");
        assert_eq!(value["visa_status"], "Pending");
        assert_eq!(value["renew_status"], "not renewed");
        assert_eq!(value["visa_expiry_date"], "2020-01-01");
        assert!(value["interview_date"].is_null());
    }

    #[test]
    fn test_reads_legacy_record() {
        let raw = r#"{
            "name": "Bob",
            "passport_number": "0987654321",
            "nationality": "India",
            "university": "ABC College",
            "visa_type": "Work",
            "interview_date": "2024-03-05",
            "interview_location": "Kathmandu",
            "interview_status": "Rescheduled",
            "visa_status": "On Hold",
            "visa_expiry_date": null,
            "Renew status": "not renewed",
            "details_updated": false
        }"#;

        let app: VisaApplication = serde_json::from_str(raw).unwrap();
        assert_eq!(app.visa_status, VisaStatus::OnHold);
        assert_eq!(app.interview_status, InterviewStatus::Other("Rescheduled".to_string()));
        assert_eq!(app.interview_date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(app.renew_status, RenewStatus::NotRenewed);
    }

    #[test]
    fn test_incomplete_profile_detected() {
        let mut app = VisaApplication::new(submission());
        assert!(app.has_complete_profile());
        app.university.clear();
        assert!(!app.has_complete_profile());
    }
}

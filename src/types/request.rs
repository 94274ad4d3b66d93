use chrono::NaiveDate;

/// Fields collected for a new visa application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub name: String,
    pub passport_number: String,
    pub nationality: String,
    pub university: String,
    pub visa_type: String,
}

impl NewApplication {
    pub fn has_empty_field(&self) -> bool {
        [
            &self.name,
            &self.passport_number,
            &self.nationality,
            &self.university,
            &self.visa_type,
        ]
        .iter()
        .any(|field| field.is_empty())
    }
}

/// Replacement applicant details for the one-time correction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsUpdate {
    pub name: String,
    pub passport_number: String,
    pub nationality: String,
    pub university: String,
}

/// Administrator decision on a pending or rejected application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve { expiry: NaiveDate },
    Reject,
}

impl Decision {
    /// Parse `Approve`/`Reject` as typed at the menu; the expiry only matters for approvals
    pub fn parse(raw: &str, expiry: NaiveDate) -> Option<Self> {
        match raw.trim() {
            "Approve" => Some(Self::Approve { expiry }),
            "Reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

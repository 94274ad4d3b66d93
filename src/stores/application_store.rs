use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::InternalError;
use crate::stores::RecordStore;
use crate::types::{format_application_id, NewApplication, VisaApplication};

/// Key under which the monotonic counter is persisted in the sequence store
pub const SEQUENCE_KEY: &str = "applications";

/// How new application ids are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdAllocation {
    /// `APP` + (number of existing records + 1)
    ///
    /// Reproduces the legacy scheme exactly. Ids can collide once records
    /// have been removed from the data file.
    Count,

    /// Persisted counter that never hands out the same sequence twice
    #[default]
    Monotonic,
}

impl FromStr for IdAllocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(IdAllocation::Count),
            "monotonic" => Ok(IdAllocation::Monotonic),
            other => Err(format!("unknown id allocation '{}' (expected count or monotonic)", other)),
        }
    }
}

/// An id picked for a new application, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedId {
    pub id: String,
    pub sequence: u32,
}

/// Application registry: visa application records plus their uniqueness rules
pub struct ApplicationStore {
    records: Arc<dyn RecordStore<VisaApplication>>,
    sequence: Arc<dyn RecordStore<u32>>,
    allocation: IdAllocation,
}

impl ApplicationStore {
    pub fn new(
        records: Arc<dyn RecordStore<VisaApplication>>,
        sequence: Arc<dyn RecordStore<u32>>,
        allocation: IdAllocation,
    ) -> Self {
        Self {
            records,
            sequence,
            allocation,
        }
    }

    pub fn load_all(&self) -> Result<BTreeMap<String, VisaApplication>, InternalError> {
        Ok(self.records.load()?)
    }

    pub fn save_all(&self, records: &BTreeMap<String, VisaApplication>) -> Result<(), InternalError> {
        Ok(self.records.save(records)?)
    }

    pub fn get(&self, id: &str) -> Result<Option<VisaApplication>, InternalError> {
        Ok(self.load_all()?.remove(id))
    }

    /// The id the next successful create would receive
    pub fn next_id(&self) -> Result<String, InternalError> {
        let records = self.load_all()?;
        Ok(self.allocate_id(&records)?.id)
    }

    /// True iff no application holds this passport number
    pub fn is_passport_unique(&self, passport_number: &str) -> Result<bool, InternalError> {
        let records = self.load_all()?;
        Ok(!passport_in_use(&records, passport_number))
    }

    /// True iff an application with exactly these five fields exists
    pub fn exists(&self, submission: &NewApplication) -> Result<bool, InternalError> {
        let records = self.load_all()?;
        Ok(submission_exists(&records, submission))
    }

    /// Pick the id for a new application against an already loaded collection
    pub fn allocate_id(
        &self,
        records: &BTreeMap<String, VisaApplication>,
    ) -> Result<AllocatedId, InternalError> {
        let count = u32::try_from(records.len())
            .map_err(|_| InternalError::parse("application count", "exceeds u32 range"))?;

        let sequence = match self.allocation {
            IdAllocation::Count => next_sequence(count)?,
            IdAllocation::Monotonic => {
                let stored = self
                    .sequence
                    .load()?
                    .get(SEQUENCE_KEY)
                    .copied()
                    .unwrap_or(0);
                let mut sequence = next_sequence(stored.max(count))?;
                while records.contains_key(&format_application_id(sequence)) {
                    sequence = next_sequence(sequence)?;
                }
                sequence
            }
        };

        Ok(AllocatedId {
            id: format_application_id(sequence),
            sequence,
        })
    }

    /// Record that `sequence` has been handed out
    ///
    /// Called after the application itself is saved. If this write is lost the
    /// next allocation still starts past every existing record.
    pub fn commit_sequence(&self, sequence: u32) -> Result<(), InternalError> {
        if self.allocation != IdAllocation::Monotonic {
            return Ok(());
        }
        let mut counters = self.sequence.load()?;
        counters.insert(SEQUENCE_KEY.to_string(), sequence);
        self.sequence.save(&counters)?;
        Ok(())
    }
}

fn next_sequence(current: u32) -> Result<u32, InternalError> {
    current
        .checked_add(1)
        .ok_or_else(|| InternalError::parse("application sequence", "counter exhausted u32 range"))
}

/// Any application in `records` already owns this passport number
pub fn passport_in_use(records: &BTreeMap<String, VisaApplication>, passport_number: &str) -> bool {
    records
        .values()
        .any(|app| app.passport_number == passport_number)
}

/// An application with the same name, passport, nationality, university and visa type exists
pub fn submission_exists(
    records: &BTreeMap<String, VisaApplication>,
    submission: &NewApplication,
) -> bool {
    records.values().any(|app| app.matches_submission(submission))
}

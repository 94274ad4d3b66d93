use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, NaiveTime};

use crate::errors::{ApplicationError, InternalError, StorageError};
use crate::services::Clock;
use crate::stores::application_store::{passport_in_use, submission_exists};
use crate::stores::ApplicationStore;
use crate::types::{
    Decision, DetailsUpdate, InterviewStatus, NewApplication, OperationContext, RenewStatus,
    VisaApplication, VisaStatus,
};

/// Required length of a passport number, in decimal digits
pub const PASSPORT_NUMBER_LENGTH: usize = 10;

/// Exactly ten ASCII decimal digits
pub fn is_valid_passport_number(passport_number: &str) -> bool {
    passport_number.len() == PASSPORT_NUMBER_LENGTH
        && passport_number.bytes().all(|b| b.is_ascii_digit())
}

/// Application lifecycle engine
///
/// Every operation re-reads the full application collection, validates the
/// requested transition (first failing check wins), and writes the full
/// collection back. Mutations are serialized on a single write lock, which
/// makes concurrent callers inside one process safe. Separate processes
/// sharing the same data file are not coordinated.
pub struct LifecycleService {
    application_store: Arc<ApplicationStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl LifecycleService {
    pub fn new(application_store: Arc<ApplicationStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            application_store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    fn lock(&self, operation: &str) -> Result<MutexGuard<'_, ()>, InternalError> {
        Ok(self
            .write_lock
            .lock()
            .map_err(|_| StorageError::poisoned(operation))?)
    }

    /// Submit a new application
    ///
    /// Validates in order (fail fast):
    /// 1. All five fields non-empty
    /// 2. Passport is exactly ten digits
    /// 3. Name differs from passport
    /// 4. No application with the identical five fields
    /// 5. Passport not held by any application
    ///
    /// # Returns
    /// * `Ok(String)` - The allocated application id
    pub fn create(
        &self,
        ctx: &OperationContext,
        submission: NewApplication,
    ) -> Result<String, InternalError> {
        if let Err(error) = validate_submission(&submission) {
            tracing::warn!(request_id = %ctx.request_id, source = %ctx.source, actor = %ctx.actor, %error, "Application rejected");
            return Err(error.into());
        }

        let _guard = self.lock("create_application")?;
        let mut records = self.application_store.load_all()?;

        let duplicate = if submission_exists(&records, &submission) {
            Some(ApplicationError::DuplicateApplication)
        } else if passport_in_use(&records, &submission.passport_number) {
            Some(ApplicationError::DuplicatePassport)
        } else {
            None
        };
        if let Some(error) = duplicate {
            tracing::warn!(request_id = %ctx.request_id, source = %ctx.source, actor = %ctx.actor, %error, "Application rejected");
            return Err(error.into());
        }

        let allocated = self.application_store.allocate_id(&records)?;
        if records.contains_key(&allocated.id) {
            tracing::warn!(application_id = %allocated.id, "Count-based id collides with an existing record; overwriting");
        }
        records.insert(allocated.id.clone(), VisaApplication::new(submission));
        self.application_store.save_all(&records)?;
        self.application_store.commit_sequence(allocated.sequence)?;

        tracing::info!(request_id = %ctx.request_id, source = %ctx.source, actor = %ctx.actor, application_id = %allocated.id, "Application created");
        Ok(allocated.id)
    }

    /// Read-only snapshot of one application
    pub fn view(&self, ctx: &OperationContext, id: &str) -> Result<VisaApplication, InternalError> {
        tracing::debug!(request_id = %ctx.request_id, source = %ctx.source, actor = %ctx.actor, application_id = id, "Viewing application");
        self.application_store
            .get(id)?
            .ok_or_else(|| ApplicationError::not_found(id).into())
    }

    /// Schedule (or reschedule) an interview
    pub fn assign_interview(
        &self,
        ctx: &OperationContext,
        id: &str,
        date: NaiveDate,
        location: &str,
    ) -> Result<VisaApplication, InternalError> {
        self.transition(ctx, "assign_interview", id, |_, current| {
            if current.visa_status.is_locked() {
                return Err(ApplicationError::locked("assign interview", current.visa_status));
            }
            if !current.has_complete_profile() {
                return Err(ApplicationError::IncompleteProfile);
            }
            if location.trim().is_empty() {
                return Err(ApplicationError::MissingLocation);
            }

            let mut updated = current.clone();
            updated.interview_date = Some(date);
            updated.interview_location = Some(location.to_string());
            updated.interview_status = InterviewStatus::Assigned;
            Ok(updated)
        })
    }

    /// Record the outcome of an assigned interview
    ///
    /// The new status text is stored verbatim; known values map onto their
    /// `InterviewStatus` variants and anything else is kept as `Other`.
    pub fn update_interview_status(
        &self,
        ctx: &OperationContext,
        id: &str,
        new_status: &str,
    ) -> Result<VisaApplication, InternalError> {
        self.transition(ctx, "update_interview_status", id, |_, current| {
            if current.interview_status != InterviewStatus::Assigned {
                return Err(ApplicationError::NoInterview);
            }

            let mut updated = current.clone();
            updated.interview_status = InterviewStatus::from_raw(new_status);
            Ok(updated)
        })
    }

    /// Approve or reject a pending/rejected application
    pub fn decide(
        &self,
        ctx: &OperationContext,
        id: &str,
        decision: Decision,
    ) -> Result<VisaApplication, InternalError> {
        self.transition(ctx, "decide", id, |_, current| {
            if current.visa_status.is_locked() {
                return Err(ApplicationError::locked("process", current.visa_status));
            }
            if !current.visa_status.accepts_decision() {
                return Err(ApplicationError::AlreadyApproved);
            }

            let mut updated = current.clone();
            match decision {
                Decision::Approve { expiry } => {
                    updated.visa_status = VisaStatus::Approved;
                    updated.visa_expiry_date = Some(expiry);
                }
                Decision::Reject => updated.visa_status = VisaStatus::Rejected,
            }
            Ok(updated)
        })
    }

    /// Extend an expired visa
    ///
    /// The current expiry date counts from midnight, so a visa expiring today
    /// is already renewable once the day has started.
    pub fn renew(
        &self,
        ctx: &OperationContext,
        id: &str,
        new_expiry: NaiveDate,
    ) -> Result<VisaApplication, InternalError> {
        let now = self.clock.now();
        self.transition(ctx, "renew", id, |_, current| {
            if current.visa_status.is_locked() {
                return Err(ApplicationError::locked("renew", current.visa_status));
            }
            let expiry = current.visa_expiry_date.ok_or(ApplicationError::NoExpiry)?;
            if expiry.and_time(NaiveTime::MIN) >= now {
                return Err(ApplicationError::NotYetExpired { expiry });
            }

            let mut updated = current.clone();
            updated.visa_expiry_date = Some(new_expiry);
            updated.renew_status = RenewStatus::Renewed;
            Ok(updated)
        })
    }

    pub fn suspend(&self, ctx: &OperationContext, id: &str) -> Result<VisaApplication, InternalError> {
        self.transition(ctx, "suspend", id, |_, current| {
            if current.visa_status != VisaStatus::Approved {
                return Err(ApplicationError::NotApproved);
            }
            let mut updated = current.clone();
            updated.visa_status = VisaStatus::Suspended;
            Ok(updated)
        })
    }

    pub fn unsuspend(&self, ctx: &OperationContext, id: &str) -> Result<VisaApplication, InternalError> {
        self.transition(ctx, "unsuspend", id, |_, current| {
            if current.visa_status != VisaStatus::Suspended {
                return Err(ApplicationError::NotSuspended);
            }
            let mut updated = current.clone();
            updated.visa_status = VisaStatus::Approved;
            Ok(updated)
        })
    }

    /// One-time correction of name, passport, nationality and university
    ///
    /// After a successful call the four fields are frozen for good.
    pub fn update_details(
        &self,
        ctx: &OperationContext,
        id: &str,
        update: DetailsUpdate,
    ) -> Result<VisaApplication, InternalError> {
        self.transition(ctx, "update_details", id, move |records, current| {
            if current.details_updated {
                return Err(ApplicationError::AlreadyUpdated);
            }
            if update.passport_number != current.passport_number
                && passport_in_use(records, &update.passport_number)
            {
                return Err(ApplicationError::DuplicatePassport);
            }

            let mut updated = current.clone();
            updated.apply_details(update);
            Ok(updated)
        })
    }

    /// Load, validate, replace and save one application under the write lock
    ///
    /// `apply` sees the full collection and the current record and returns the
    /// replacement. Nothing is written when it fails.
    fn transition<F>(
        &self,
        ctx: &OperationContext,
        operation: &'static str,
        id: &str,
        apply: F,
    ) -> Result<VisaApplication, InternalError>
    where
        F: FnOnce(&BTreeMap<String, VisaApplication>, &VisaApplication) -> Result<VisaApplication, ApplicationError>,
    {
        let _guard = self.lock(operation)?;
        let mut records = self.application_store.load_all()?;

        let outcome = records
            .get(id)
            .ok_or_else(|| ApplicationError::not_found(id))
            .and_then(|current| apply(&records, current));

        let updated = match outcome {
            Ok(updated) => updated,
            Err(error) => {
                tracing::warn!(
                    request_id = %ctx.request_id,
                    source = %ctx.source,
                    actor = %ctx.actor,
                    application_id = id,
                    operation,
                    %error,
                    "Transition rejected"
                );
                return Err(error.into());
            }
        };

        records.insert(id.to_string(), updated.clone());
        self.application_store.save_all(&records)?;

        tracing::info!(
            request_id = %ctx.request_id,
            source = %ctx.source,
            actor = %ctx.actor,
            application_id = id,
            operation,
            visa_status = %updated.visa_status,
            interview_status = %updated.interview_status,
            "Transition applied"
        );
        Ok(updated)
    }
}

fn validate_submission(submission: &NewApplication) -> Result<(), ApplicationError> {
    if submission.has_empty_field() {
        return Err(ApplicationError::MissingFields);
    }
    if !is_valid_passport_number(&submission.passport_number) {
        return Err(ApplicationError::InvalidPassportFormat);
    }
    if submission.name == submission.passport_number {
        return Err(ApplicationError::NameEqualsPassport);
    }
    Ok(())
}

//! Job applications
//!
//! Links an applicant to a job and the job's owner. `job_owner_id` is
//! stamped from the job at creation time; no operation reassigns a job, so
//! the two are never out of sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{ApplicationId, JobId, UserId};
use crate::status::{Decision, ReviewStatus};

/// An application by a user to a job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    /// Unique identifier.
    pub id: ApplicationId,
    /// Job applied to.
    pub job_id: JobId,
    /// User applying.
    pub applicant_id: UserId,
    /// Owner of the job at application time.
    pub job_owner_id: UserId,
    /// Current lifecycle status.
    pub status: ReviewStatus,
    /// When the application was submitted.
    pub submitted_at: DateTime<Utc>,
    /// When the owner decided, if they have.
    #[serde(default)]
    pub decided_at: Option<DateTime<Utc>>,
}

impl JobApplication {
    /// Create a pending application.
    #[must_use]
    pub fn new(job_id: JobId, applicant_id: UserId, job_owner_id: UserId) -> Self {
        Self {
            id: ApplicationId::new(),
            job_id,
            applicant_id,
            job_owner_id,
            status: ReviewStatus::Pending,
            submitted_at: Utc::now(),
            decided_at: None,
        }
    }

    /// Apply the owner's decision.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidTransition`] if the application has
    /// already been decided.
    pub fn decide(&mut self, decision: Decision) -> Result<(), DomainError> {
        self.status = self.status.apply(decision)?;
        self.decided_at = Some(Utc::now());
        Ok(())
    }
}

//! Job application repository
//!
//! `job_owner_id` is stamped from the fetched job at creation time, and
//! the review-status machine is enforced on every decision.

use std::sync::Arc;

use worknet_backend::{collections, DocumentStore, Filter};
use worknet_domain::{
    ApplicationId, Decision, DomainError, JobApplication, JobId, UserId,
};

use crate::codec::{decode, decode_all, encode};
use crate::error::RepoError;
use crate::jobs::JobRepository;

/// Repository over the `applications` collection.
#[derive(Clone)]
pub struct ApplicationRepository {
    store: Arc<dyn DocumentStore>,
    jobs: JobRepository,
}

impl ApplicationRepository {
    /// Create a repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            jobs: JobRepository::new(Arc::clone(&store)),
            store,
        }
    }

    /// Submit an application by `applicant` to `job`.
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] if the job does not exist
    /// - [`DomainError::SelfReference`] if the applicant owns the job
    /// - [`RepoError::Conflict`] if the applicant already applied
    pub async fn apply(
        &self,
        job: JobId,
        applicant: UserId,
    ) -> Result<JobApplication, RepoError> {
        let job_record = self.jobs.get(job).await?;
        if job_record.user_id == applicant {
            return Err(DomainError::SelfReference {
                action: "job application",
            }
            .into());
        }
        if self
            .for_applicant(applicant)
            .await?
            .iter()
            .any(|a| a.job_id == job)
        {
            return Err(RepoError::conflict(format!(
                "user {applicant} already applied to job {job}"
            )));
        }

        let application = JobApplication::new(job, applicant, job_record.user_id);
        self.store
            .insert(
                collections::APPLICATIONS,
                &application.id.to_string(),
                encode(&application)?,
            )
            .await?;
        tracing::info!(application = %application.id, %job, "application submitted");
        Ok(application)
    }

    /// Fetch one application.
    pub async fn get(&self, id: ApplicationId) -> Result<JobApplication, RepoError> {
        let doc = self
            .store
            .get(collections::APPLICATIONS, &id.to_string())
            .await?
            .ok_or_else(|| RepoError::not_found("application", id))?;
        decode(collections::APPLICATIONS, doc)
    }

    /// Applications submitted to `job`.
    pub async fn for_job(&self, job: JobId) -> Result<Vec<JobApplication>, RepoError> {
        let docs = self
            .store
            .query(
                collections::APPLICATIONS,
                &Filter::field_eq("jobId", job.to_string()),
            )
            .await?;
        decode_all(collections::APPLICATIONS, docs)
    }

    /// Applications submitted by `applicant`.
    pub async fn for_applicant(
        &self,
        applicant: UserId,
    ) -> Result<Vec<JobApplication>, RepoError> {
        let docs = self
            .store
            .query(
                collections::APPLICATIONS,
                &Filter::field_eq("applicantId", applicant.to_string()),
            )
            .await?;
        decode_all(collections::APPLICATIONS, docs)
    }

    /// Pending applications addressed to `owner`.
    pub async fn inbox_for(&self, owner: UserId) -> Result<Vec<JobApplication>, RepoError> {
        let docs = self
            .store
            .query(
                collections::APPLICATIONS,
                &Filter::field_eq("jobOwnerId", owner.to_string()),
            )
            .await?;
        let applications: Vec<JobApplication> = decode_all(collections::APPLICATIONS, docs)?;
        Ok(applications
            .into_iter()
            .filter(|a| !a.status.is_terminal())
            .collect())
    }

    /// Apply the owner's decision to a pending application.
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] if the application does not exist
    /// - [`DomainError::InvalidTransition`] if it was already decided
    pub async fn decide(
        &self,
        id: ApplicationId,
        decision: Decision,
    ) -> Result<JobApplication, RepoError> {
        let mut application = self.get(id).await?;
        application.decide(decision)?;
        self.store
            .update(
                collections::APPLICATIONS,
                &id.to_string(),
                encode(&application)?,
            )
            .await?;
        tracing::info!(application = %id, status = ?application.status, "application decided");
        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worknet_backend::MemoryBackend;
    use worknet_domain::{Job, ReviewStatus};

    async fn setup() -> (ApplicationRepository, JobRepository, Job, UserId) {
        let backend: Arc<dyn DocumentStore> = Arc::new(MemoryBackend::new());
        let jobs = JobRepository::new(Arc::clone(&backend));
        let apps = ApplicationRepository::new(backend);

        let job = Job::posting(UserId::new(), "Backend engineer");
        jobs.create(&job).await.unwrap();
        (apps, jobs, job, UserId::new())
    }

    #[tokio::test]
    async fn apply_stamps_owner_from_job() {
        let (apps, _, job, applicant) = setup().await;
        let application = apps.apply(job.id, applicant).await.unwrap();
        assert_eq!(application.job_owner_id, job.user_id);
        assert_eq!(application.status, ReviewStatus::Pending);
    }

    #[tokio::test]
    async fn owner_cannot_apply_to_own_job() {
        let (apps, _, job, _) = setup().await;
        let err = apps.apply(job.id, job.user_id).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Domain(DomainError::SelfReference { .. })
        ));
    }

    #[tokio::test]
    async fn duplicate_application_conflicts() {
        let (apps, _, job, applicant) = setup().await;
        apps.apply(job.id, applicant).await.unwrap();
        let err = apps.apply(job.id, applicant).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict { .. }));
    }

    #[tokio::test]
    async fn decide_enforces_terminality() {
        let (apps, _, job, applicant) = setup().await;
        let application = apps.apply(job.id, applicant).await.unwrap();

        let decided = apps.decide(application.id, Decision::Accept).await.unwrap();
        assert_eq!(decided.status, ReviewStatus::Accepted);

        let err = apps
            .decide(application.id, Decision::Reject)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Domain(DomainError::InvalidTransition { .. })
        ));
        // The stored record keeps its first decision.
        assert_eq!(
            apps.get(application.id).await.unwrap().status,
            ReviewStatus::Accepted
        );
    }

    #[tokio::test]
    async fn inbox_excludes_decided_applications() {
        let (apps, _, job, applicant) = setup().await;
        let application = apps.apply(job.id, applicant).await.unwrap();
        assert_eq!(apps.inbox_for(job.user_id).await.unwrap().len(), 1);

        apps.decide(application.id, Decision::Reject).await.unwrap();
        assert!(apps.inbox_for(job.user_id).await.unwrap().is_empty());
    }
}

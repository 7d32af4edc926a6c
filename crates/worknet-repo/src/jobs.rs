//! Job repository
//!
//! Jobs plus the saved-job join records. Saving never touches the job
//! document itself.

use std::collections::HashSet;
use std::sync::Arc;

use worknet_backend::{collections, DocumentStore, Filter};
use worknet_domain::{partition_jobs, Job, JobBoard, JobId, SavedJob, UserId};

use crate::codec::{decode, decode_all, encode};
use crate::error::RepoError;

/// Repository over the `jobs` and `saved_jobs` collections.
#[derive(Clone)]
pub struct JobRepository {
    store: Arc<dyn DocumentStore>,
}

impl JobRepository {
    /// Create a repository over `store`.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Every job in the collection.
    pub async fn all(&self) -> Result<Vec<Job>, RepoError> {
        decode_all(collections::JOBS, self.store.list(collections::JOBS).await?)
    }

    /// Fetch one job.
    pub async fn get(&self, id: JobId) -> Result<Job, RepoError> {
        let doc = self
            .store
            .get(collections::JOBS, &id.to_string())
            .await?
            .ok_or_else(|| RepoError::not_found("job", id))?;
        decode(collections::JOBS, doc)
    }

    /// Create a job.
    pub async fn create(&self, job: &Job) -> Result<(), RepoError> {
        self.store
            .insert(collections::JOBS, &job.id.to_string(), encode(job)?)
            .await?;
        Ok(())
    }

    /// Jobs owned by `user`.
    pub async fn owned_by(&self, user: UserId) -> Result<Vec<Job>, RepoError> {
        let docs = self
            .store
            .query(
                collections::JOBS,
                &Filter::field_eq("userId", user.to_string()),
            )
            .await?;
        decode_all(collections::JOBS, docs)
    }

    /// IDs of the jobs `user` has saved.
    pub async fn saved_ids_for(&self, user: UserId) -> Result<HashSet<JobId>, RepoError> {
        let docs = self
            .store
            .query(
                collections::SAVED_JOBS,
                &Filter::field_eq("userId", user.to_string()),
            )
            .await?;
        let saved: Vec<SavedJob> = decode_all(collections::SAVED_JOBS, docs)?;
        Ok(saved.into_iter().map(|s| s.job_id).collect())
    }

    /// Save a job for `user`. Idempotent.
    pub async fn save(&self, user: UserId, job: JobId) -> Result<(), RepoError> {
        let record = SavedJob::new(user, job);
        match self
            .store
            .insert(collections::SAVED_JOBS, &Self::join_id(user, job), encode(&record)?)
            .await
        {
            Ok(()) => Ok(()),
            Err(worknet_backend::BackendError::AlreadyExists { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a saved-job record. No-op if the job was not saved.
    pub async fn unsave(&self, user: UserId, job: JobId) -> Result<(), RepoError> {
        match self
            .store
            .delete(collections::SAVED_JOBS, &Self::join_id(user, job))
            .await
        {
            Ok(()) => Ok(()),
            Err(worknet_backend::BackendError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The viewer's job board: all jobs partitioned into recommended and
    /// saved lists.
    pub async fn board_for(&self, viewer: UserId) -> Result<JobBoard, RepoError> {
        let jobs = self.all().await?;
        let saved = self.saved_ids_for(viewer).await?;
        Ok(partition_jobs(jobs, &saved, viewer))
    }

    fn join_id(user: UserId, job: JobId) -> String {
        format!("{user}:{job}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worknet_backend::MemoryBackend;

    fn repo() -> JobRepository {
        JobRepository::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn save_is_idempotent_and_unsave_is_forgiving() {
        let repo = repo();
        let viewer = UserId::new();
        let job = Job::posting(UserId::new(), "Backend engineer");
        repo.create(&job).await.unwrap();

        repo.save(viewer, job.id).await.unwrap();
        repo.save(viewer, job.id).await.unwrap();
        assert_eq!(repo.saved_ids_for(viewer).await.unwrap().len(), 1);

        repo.unsave(viewer, job.id).await.unwrap();
        repo.unsave(viewer, job.id).await.unwrap();
        assert!(repo.saved_ids_for(viewer).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn board_partitions_saved_and_recommended() {
        let repo = repo();
        let viewer = UserId::new();
        let owner = UserId::new();

        let posting = Job::posting(owner, "Backend engineer");
        let saved_posting = Job::posting(owner, "Designer");
        let work_item = Job::work_item(owner, "Write report");
        for job in [&posting, &saved_posting, &work_item] {
            repo.create(job).await.unwrap();
        }
        repo.save(viewer, saved_posting.id).await.unwrap();

        let board = repo.board_for(viewer).await.unwrap();
        assert_eq!(board.recommended, vec![posting]);
        assert_eq!(board.saved, vec![saved_posting]);
    }

    #[tokio::test]
    async fn owned_by_uses_equality_filter() {
        let repo = repo();
        let owner = UserId::new();
        repo.create(&Job::posting(owner, "Mine")).await.unwrap();
        repo.create(&Job::posting(UserId::new(), "Theirs"))
            .await
            .unwrap();

        let mine = repo.owned_by(owner).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
    }
}

//! Jobs and the job-board partition
//!
//! A job is either a public posting (`is_job_posting == true`) or a
//! personal work item. Save/unsave bookkeeping lives in a separate
//! [`SavedJob`] join record, never on the job itself.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CollectionId, JobId, UserId};

/// A job posting or personal work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique identifier.
    pub id: JobId,
    /// Owner of the job.
    pub user_id: UserId,
    /// Job title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Skills the posting asks for.
    #[serde(default)]
    pub skills: Vec<String>,
    /// True for public postings, false for personal work items.
    pub is_job_posting: bool,
    /// Owner-defined collection this job belongs to, if any.
    #[serde(default)]
    pub collection_id: Option<CollectionId>,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create a public job posting owned by `user_id`.
    #[must_use]
    pub fn posting(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            user_id,
            title: title.into(),
            description: String::new(),
            skills: Vec::new(),
            is_job_posting: true,
            collection_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create a personal work item owned by `user_id`.
    #[must_use]
    pub fn work_item(user_id: UserId, title: impl Into<String>) -> Self {
        let mut job = Self::posting(user_id, title);
        job.is_job_posting = false;
        job
    }
}

/// Join record marking that a user saved a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJob {
    /// User who saved the job.
    pub user_id: UserId,
    /// The saved job.
    pub job_id: JobId,
    /// When the save happened.
    pub saved_at: DateTime<Utc>,
}

impl SavedJob {
    /// Record that `user_id` saved `job_id` now.
    #[must_use]
    pub fn new(user_id: UserId, job_id: JobId) -> Self {
        Self {
            user_id,
            job_id,
            saved_at: Utc::now(),
        }
    }
}

/// Job lists a viewer sees on the jobs screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobBoard {
    /// Postings the viewer has not saved, excluding their own.
    pub recommended: Vec<Job>,
    /// Postings the viewer has saved.
    pub saved: Vec<Job>,
}

/// Partition `jobs` into the viewer's recommended and saved lists.
///
/// Guarantees:
/// - `recommended` and `saved` are disjoint.
/// - Only public postings (`is_job_posting == true`) appear in either list.
/// - The viewer's own postings never appear in `recommended`.
/// - Input order is preserved within each list.
#[must_use]
pub fn partition_jobs(jobs: Vec<Job>, saved_ids: &HashSet<JobId>, viewer: UserId) -> JobBoard {
    let mut board = JobBoard::default();
    for job in jobs {
        if !job.is_job_posting {
            continue;
        }
        if saved_ids.contains(&job.id) {
            board.saved.push(job);
        } else if job.user_id != viewer {
            board.recommended.push(job);
        }
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn job(owner: UserId, posting: bool) -> Job {
        if posting {
            Job::posting(owner, "title")
        } else {
            Job::work_item(owner, "title")
        }
    }

    #[test]
    fn partition_excludes_non_postings() {
        // Worked example: j1 is a posting, j2 is a personal work item.
        let owner = UserId::new();
        let viewer = UserId::new();
        let j1 = job(owner, true);
        let j2 = job(owner, false);

        let board = partition_jobs(vec![j1.clone(), j2], &HashSet::new(), viewer);

        assert_eq!(board.recommended, vec![j1]);
        assert!(board.saved.is_empty());
    }

    #[test]
    fn partition_moves_saved_jobs_out_of_recommended() {
        let owner = UserId::new();
        let viewer = UserId::new();
        let j1 = job(owner, true);
        let j2 = job(owner, true);
        let saved: HashSet<_> = [j1.id].into();

        let board = partition_jobs(vec![j1.clone(), j2.clone()], &saved, viewer);

        assert_eq!(board.saved, vec![j1]);
        assert_eq!(board.recommended, vec![j2]);
    }

    #[test]
    fn partition_hides_own_postings_from_recommended() {
        let viewer = UserId::new();
        let mine = job(viewer, true);
        let board = partition_jobs(vec![mine], &HashSet::new(), viewer);
        assert!(board.recommended.is_empty());
    }

    #[test]
    fn own_saved_posting_still_shows_in_saved() {
        let viewer = UserId::new();
        let mine = job(viewer, true);
        let saved: HashSet<_> = [mine.id].into();
        let board = partition_jobs(vec![mine.clone()], &saved, viewer);
        assert_eq!(board.saved, vec![mine]);
    }
}

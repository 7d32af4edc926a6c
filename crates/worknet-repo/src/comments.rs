//! Comment repository
//!
//! Comments are append-only; the tagged target type guarantees every
//! stored document references exactly one of a post or a job.

use std::sync::Arc;

use worknet_backend::{collections, DocumentStore, Filter};
use worknet_domain::{Comment, CommentTarget};

use crate::codec::{decode_all, encode};
use crate::error::RepoError;

/// Repository over the `comments` collection.
#[derive(Clone)]
pub struct CommentRepository {
    store: Arc<dyn DocumentStore>,
}

impl CommentRepository {
    /// Create a repository over `store`.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Comments on `target`, oldest first.
    pub async fn for_target(&self, target: CommentTarget) -> Result<Vec<Comment>, RepoError> {
        let filter = match target {
            CommentTarget::Post(id) => Filter::field_eq("postId", id.to_string()),
            CommentTarget::Job(id) => Filter::field_eq("jobId", id.to_string()),
        };
        let mut comments: Vec<Comment> =
            decode_all(collections::COMMENTS, self.store.query(collections::COMMENTS, &filter).await?)?;
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    /// Append a comment.
    pub async fn create(&self, comment: &Comment) -> Result<(), RepoError> {
        self.store
            .insert(
                collections::COMMENTS,
                &comment.id.to_string(),
                encode(comment)?,
            )
            .await?;
        Ok(())
    }
}

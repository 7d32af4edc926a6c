//! Comments
//!
//! A comment is attached to exactly one of a post or a job. The backend
//! documents carry the legacy optional `postId`/`jobId` pair; this crate
//! models the target as a tagged variant and validates exclusivity at the
//! serialization boundary, so an ambiguous document can never enter the
//! client.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::ids::{CommentId, JobId, PostId, UserId};

/// The entity a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentTarget {
    /// Attached to a feed post.
    Post(PostId),
    /// Attached to a job posting.
    Job(JobId),
}

/// A comment on a post or job. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier.
    pub id: CommentId,
    /// Author of the comment.
    pub author_id: UserId,
    /// What the comment is attached to.
    #[serde(flatten)]
    pub target: CommentTarget,
    /// Comment text.
    pub body: String,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment by `author_id` on `target`.
    #[must_use]
    pub fn new(author_id: UserId, target: CommentTarget, body: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(),
            author_id,
            target,
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}

/// Wire form of [`CommentTarget`]: the legacy optional foreign-key pair.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    post_id: Option<PostId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    job_id: Option<JobId>,
}

impl TryFrom<RawTarget> for CommentTarget {
    type Error = DomainError;

    fn try_from(raw: RawTarget) -> Result<Self, Self::Error> {
        match (raw.post_id, raw.job_id) {
            (Some(post), None) => Ok(Self::Post(post)),
            (None, Some(job)) => Ok(Self::Job(job)),
            (Some(_), Some(_)) => Err(DomainError::AmbiguousCommentTarget),
            (None, None) => Err(DomainError::MissingCommentTarget),
        }
    }
}

impl From<CommentTarget> for RawTarget {
    fn from(target: CommentTarget) -> Self {
        match target {
            CommentTarget::Post(id) => Self {
                post_id: Some(id),
                job_id: None,
            },
            CommentTarget::Job(id) => Self {
                post_id: None,
                job_id: Some(id),
            },
        }
    }
}

impl Serialize for CommentTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawTarget::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CommentTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTarget::deserialize(deserializer)?;
        Self::try_from(raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comment_on_post_serializes_post_id_only() {
        let comment = Comment::new(UserId::new(), CommentTarget::Post(PostId::new()), "nice");
        let doc = serde_json::to_value(&comment).unwrap();
        assert!(doc.get("postId").is_some());
        assert!(doc.get("jobId").is_none());
    }

    #[test]
    fn comment_roundtrips() {
        let comment = Comment::new(UserId::new(), CommentTarget::Job(JobId::new()), "applied!");
        let doc = serde_json::to_value(&comment).unwrap();
        let back: Comment = serde_json::from_value(doc).unwrap();
        assert_eq!(back, comment);
    }

    #[test]
    fn document_with_both_targets_is_rejected() {
        let doc = json!({
            "id": CommentId::new(),
            "authorId": UserId::new(),
            "postId": PostId::new(),
            "jobId": JobId::new(),
            "body": "??",
            "createdAt": "2024-01-01T00:00:00Z",
        });
        let err = serde_json::from_value::<Comment>(doc).unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn document_with_no_target_is_rejected() {
        let doc = json!({
            "id": CommentId::new(),
            "authorId": UserId::new(),
            "body": "floating",
            "createdAt": "2024-01-01T00:00:00Z",
        });
        assert!(serde_json::from_value::<Comment>(doc).is_err());
    }
}

//! Feed posts
//!
//! A post is immutable once created except for its likes collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PostId, UserId};

/// A user-authored feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier.
    pub id: PostId,
    /// Author of the post.
    pub author_id: UserId,
    /// Post text.
    pub body: String,
    /// Public URL of an attached image, if any.
    #[serde(default)]
    pub image_url: Option<String>,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// Users who liked the post.
    #[serde(default)]
    pub likes: Vec<UserId>,
}

impl Post {
    /// Create a new post authored by `author_id`.
    #[must_use]
    pub fn new(author_id: UserId, body: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            id: PostId::new(),
            author_id,
            body: body.into(),
            image_url,
            created_at: Utc::now(),
            likes: Vec::new(),
        }
    }

    /// Whether `user` has liked this post.
    #[inline]
    #[must_use]
    pub fn liked_by(&self, user: UserId) -> bool {
        self.likes.contains(&user)
    }

    /// Record a like. Idempotent.
    pub fn add_like(&mut self, user: UserId) {
        if !self.likes.contains(&user) {
            self.likes.push(user);
        }
    }

    /// Remove a like. No-op if `user` had not liked the post.
    pub fn remove_like(&mut self, user: UserId) {
        self.likes.retain(|u| *u != user);
    }
}

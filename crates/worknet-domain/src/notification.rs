//! Notifications
//!
//! Directed from one user to another, created as a side effect of other
//! actions (commenting, connection requests, accepted applications). The
//! only mutation is flipping `is_read`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ApplicationId, CommentId, JobId, NotificationId, PostId, RequestId, UserId};

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// Someone commented on your post or job.
    Comment,
    /// Someone sent you a connection request.
    FollowRequest,
    /// You were invited onto a job (application accepted).
    Invite,
}

/// Reference to the entity a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum NotificationRef {
    /// A feed post.
    Post(PostId),
    /// A job posting.
    Job(JobId),
    /// A comment.
    Comment(CommentId),
    /// A job application.
    Application(ApplicationId),
    /// A connection request.
    Request(RequestId),
}

/// A directed notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique identifier.
    pub id: NotificationId,
    /// User who triggered the notification.
    pub sender_id: UserId,
    /// User the notification is for.
    pub recipient_id: UserId,
    /// Category.
    pub kind: NotificationKind,
    /// Related entity, if any.
    #[serde(default)]
    pub reference: Option<NotificationRef>,
    /// Whether the recipient has seen it.
    #[serde(default)]
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification from `sender_id` to `recipient_id`.
    #[must_use]
    pub fn new(
        sender_id: UserId,
        recipient_id: UserId,
        kind: NotificationKind,
        reference: Option<NotificationRef>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            sender_id,
            recipient_id,
            kind,
            reference,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_uses_screaming_snake_wire_names() {
        let json = serde_json::to_string(&NotificationKind::FollowRequest).unwrap();
        assert_eq!(json, "\"FOLLOW_REQUEST\"");
    }

    #[test]
    fn new_notifications_start_unread() {
        let n = Notification::new(
            UserId::new(),
            UserId::new(),
            NotificationKind::Comment,
            Some(NotificationRef::Post(PostId::new())),
        );
        assert!(!n.is_read);
    }
}

//! Notification repository

use std::sync::Arc;

use worknet_backend::{collections, DocumentStore, Filter};
use worknet_domain::{Notification, NotificationId, UserId};

use crate::codec::{decode, decode_all, encode};
use crate::error::RepoError;

/// Repository over the `notifications` collection.
#[derive(Clone)]
pub struct NotificationRepository {
    store: Arc<dyn DocumentStore>,
}

impl NotificationRepository {
    /// Create a repository over `store`.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Notifications addressed to `user`, newest first.
    pub async fn for_user(&self, user: UserId) -> Result<Vec<Notification>, RepoError> {
        let docs = self
            .store
            .query(
                collections::NOTIFICATIONS,
                &Filter::field_eq("recipientId", user.to_string()),
            )
            .await?;
        let mut notifications: Vec<Notification> = decode_all(collections::NOTIFICATIONS, docs)?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    /// Unread notifications addressed to `user`.
    pub async fn unread_count(&self, user: UserId) -> Result<usize, RepoError> {
        Ok(self
            .for_user(user)
            .await?
            .iter()
            .filter(|n| !n.is_read)
            .count())
    }

    /// Create a notification.
    pub async fn create(&self, notification: &Notification) -> Result<(), RepoError> {
        self.store
            .insert(
                collections::NOTIFICATIONS,
                &notification.id.to_string(),
                encode(notification)?,
            )
            .await?;
        Ok(())
    }

    /// Flip one notification to read.
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), RepoError> {
        let doc = self
            .store
            .get(collections::NOTIFICATIONS, &id.to_string())
            .await?
            .ok_or_else(|| RepoError::not_found("notification", id))?;
        let mut notification: Notification = decode(collections::NOTIFICATIONS, doc)?;
        notification.is_read = true;
        self.store
            .update(
                collections::NOTIFICATIONS,
                &id.to_string(),
                encode(&notification)?,
            )
            .await?;
        Ok(())
    }

    /// Flip every unread notification for `user` to read, one write per
    /// document (the backend has no batch update).
    pub async fn mark_all_read(&self, user: UserId) -> Result<(), RepoError> {
        for notification in self.for_user(user).await? {
            if !notification.is_read {
                self.mark_read(notification.id).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worknet_backend::MemoryBackend;
    use worknet_domain::NotificationKind;

    fn note(to: UserId) -> Notification {
        Notification::new(UserId::new(), to, NotificationKind::Comment, None)
    }

    #[tokio::test]
    async fn unread_count_tracks_mark_read() {
        let repo = NotificationRepository::new(Arc::new(MemoryBackend::new()));
        let me = UserId::new();

        let a = note(me);
        let b = note(me);
        repo.create(&a).await.unwrap();
        repo.create(&b).await.unwrap();
        repo.create(&note(UserId::new())).await.unwrap(); // someone else's

        assert_eq!(repo.unread_count(me).await.unwrap(), 2);

        repo.mark_read(a.id).await.unwrap();
        assert_eq!(repo.unread_count(me).await.unwrap(), 1);

        repo.mark_all_read(me).await.unwrap();
        assert_eq!(repo.unread_count(me).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn for_user_is_newest_first() {
        let repo = NotificationRepository::new(Arc::new(MemoryBackend::new()));
        let me = UserId::new();

        let mut old = note(me);
        old.created_at -= chrono::Duration::days(1);
        let new = note(me);
        repo.create(&old).await.unwrap();
        repo.create(&new).await.unwrap();

        let list = repo.for_user(me).await.unwrap();
        assert_eq!(list[0].id, new.id);
        assert_eq!(list[1].id, old.id);
    }
}

//! Notifications screen
//!
//! Lists the viewer's notifications with resolved senders and keeps the
//! unread count the badge on the tab bar renders from.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use worknet_domain::{Notification, NotificationId, User, UserId};
use worknet_repo::{NotificationRepository, RepoError, UserRepository};

use crate::handles::Handles;
use crate::state::ViewState;

/// A notification with its sender resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationView {
    /// The notification.
    pub notification: Notification,
    /// Sender record (placeholder if the lookup failed).
    pub sender: User,
}

/// Everything the notifications screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationsState {
    /// Notifications, newest first.
    pub items: Vec<NotificationView>,
    /// How many of them are unread.
    pub unread: usize,
}

/// Orchestrator for the notifications screen.
pub struct NotificationsScreen {
    viewer: UserId,
    notifications: NotificationRepository,
    users: UserRepository,
    state: watch::Sender<ViewState<NotificationsState>>,
}

impl NotificationsScreen {
    /// Create the screen for `viewer`.
    #[must_use]
    pub fn new(handles: &Handles, viewer: UserId) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            viewer,
            notifications: NotificationRepository::new(Arc::clone(&handles.store)),
            users: UserRepository::new(Arc::clone(&handles.store)),
            state,
        }
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState<NotificationsState>> {
        self.state.subscribe()
    }

    /// The current state record.
    #[must_use]
    pub fn current(&self) -> ViewState<NotificationsState> {
        self.state.borrow().clone()
    }

    /// Load (or reload) the screen.
    pub async fn load(&self) {
        self.state.send_replace(ViewState::Loading);
        match self.fetch().await {
            Ok(data) => {
                self.state.send_replace(ViewState::Ready(data));
            }
            Err(error) => {
                tracing::error!(%error, "notifications load failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }

    /// Mark one notification as read.
    pub async fn mark_read(&self, id: NotificationId) {
        self.mutate(self.notifications.mark_read(id)).await;
    }

    /// Mark every notification for the viewer as read.
    pub async fn mark_all_read(&self) {
        self.mutate(self.notifications.mark_all_read(self.viewer)).await;
    }

    async fn fetch(&self) -> Result<NotificationsState, RepoError> {
        let notifications = self.notifications.for_user(self.viewer).await?;
        let unread = notifications.iter().filter(|n| !n.is_read).count();

        let mut sender_ids: Vec<UserId> = notifications.iter().map(|n| n.sender_id).collect();
        sender_ids.sort_unstable();
        sender_ids.dedup();
        let senders = self.users.get_many(&sender_ids).await?;
        let by_id: HashMap<UserId, User> = senders.into_iter().map(|u| (u.id, u)).collect();

        Ok(NotificationsState {
            items: notifications
                .into_iter()
                .map(|notification| NotificationView {
                    sender: by_id
                        .get(&notification.sender_id)
                        .cloned()
                        .unwrap_or_else(|| User::placeholder(notification.sender_id)),
                    notification,
                })
                .collect(),
            unread,
        })
    }

    async fn mutate(&self, op: impl std::future::Future<Output = Result<(), RepoError>>) {
        self.state.send_replace(ViewState::Loading);
        match op.await {
            Ok(()) => self.load().await,
            Err(error) => {
                tracing::error!(%error, "notifications mutation failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worknet_domain::NotificationKind;

    use worknet_backend::MemoryBackend;

    async fn screen_with_two_notes() -> NotificationsScreen {
        let backend = Arc::new(MemoryBackend::new());
        let handles = Handles::in_memory(backend);
        let viewer = UserId::new();
        let sender = UserId::new();

        UserRepository::new(Arc::clone(&handles.store))
            .create(&User::new(sender, "s@example.com", "Sender"))
            .await
            .unwrap();

        let repo = NotificationRepository::new(Arc::clone(&handles.store));
        repo.create(&Notification::new(
            sender,
            viewer,
            NotificationKind::Comment,
            None,
        ))
        .await
        .unwrap();
        repo.create(&Notification::new(
            sender,
            viewer,
            NotificationKind::FollowRequest,
            None,
        ))
        .await
        .unwrap();

        NotificationsScreen::new(&handles, viewer)
    }

    #[tokio::test]
    async fn load_resolves_senders_and_counts_unread() {
        let screen = screen_with_two_notes().await;
        screen.load().await;

        let state = screen.current();
        let data = state.ready().unwrap();
        assert_eq!(data.items.len(), 2);
        assert_eq!(data.unread, 2);
        assert_eq!(data.items[0].sender.display_name, "Sender");
    }

    #[tokio::test]
    async fn mark_read_drops_the_unread_count() {
        let screen = screen_with_two_notes().await;
        screen.load().await;
        let first = screen.current().ready().unwrap().items[0].notification.id;

        screen.mark_read(first).await;
        let state = screen.current();
        assert_eq!(state.ready().unwrap().unread, 1);

        screen.mark_all_read().await;
        let state = screen.current();
        assert_eq!(state.ready().unwrap().unread, 0);
    }
}

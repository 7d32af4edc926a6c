//! Connections screen
//!
//! The viewer's current connections and the incoming pending requests.
//! Sending a request notifies the recipient; accepting one links both
//! users' connection lists.

use std::sync::Arc;

use tokio::sync::watch;
use worknet_domain::{
    ConnectionRequest, Decision, DomainError, Notification, NotificationKind, NotificationRef,
    RequestId, ReviewStatus, User, UserId,
};
use worknet_repo::{ConnectionRepository, NotificationRepository, RepoError, UserRepository};

use crate::handles::Handles;
use crate::state::ViewState;

/// A pending request with its sender resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingRequest {
    /// The request.
    pub request: ConnectionRequest,
    /// Sender record (placeholder if the lookup failed).
    pub sender: User,
}

/// Everything the connections screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionsState {
    /// Users the viewer is connected to.
    pub connections: Vec<User>,
    /// Pending requests addressed to the viewer, oldest first.
    pub incoming: Vec<IncomingRequest>,
}

/// Orchestrator for the connections screen.
pub struct ConnectionsScreen {
    viewer: UserId,
    requests: ConnectionRepository,
    users: UserRepository,
    notifications: NotificationRepository,
    state: watch::Sender<ViewState<ConnectionsState>>,
}

impl ConnectionsScreen {
    /// Create the screen for `viewer`.
    #[must_use]
    pub fn new(handles: &Handles, viewer: UserId) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            viewer,
            requests: ConnectionRepository::new(Arc::clone(&handles.store)),
            users: UserRepository::new(Arc::clone(&handles.store)),
            notifications: NotificationRepository::new(Arc::clone(&handles.store)),
            state,
        }
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState<ConnectionsState>> {
        self.state.subscribe()
    }

    /// The current state record.
    #[must_use]
    pub fn current(&self) -> ViewState<ConnectionsState> {
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
                tracing::error!(%error, "connections load failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }

    /// Send a connection request and notify the recipient.
    pub async fn send_request(&self, to: UserId) {
        self.mutate(async {
            let request = self.requests.send(self.viewer, to).await?;
            let notification = Notification::new(
                self.viewer,
                to,
                NotificationKind::FollowRequest,
                Some(NotificationRef::Request(request.id)),
            );
            self.notifications.create(&notification).await?;
            Ok(())
        })
        .await;
    }

    /// Decide a pending incoming request.
    ///
    /// Accepting settles the request and then links both users. The link
    /// write can fail after the request is already terminal, so an accept
    /// of an already-accepted request re-runs the idempotent link instead
    /// of failing; retrying converges on the linked state.
    pub async fn respond(&self, id: RequestId, decision: Decision) {
        self.mutate(async {
            let request = match self.requests.decide(id, decision).await {
                Ok(request) => request,
                Err(RepoError::Domain(DomainError::InvalidTransition { .. }))
                    if decision == Decision::Accept =>
                {
                    let request = self.requests.get(id).await?;
                    if request.status != ReviewStatus::Accepted {
                        return Err(DomainError::InvalidTransition {
                            from: request.status,
                            to: ReviewStatus::Accepted,
                        }
                        .into());
                    }
                    request
                }
                Err(error) => return Err(error),
            };
            if decision == Decision::Accept {
                self.users
                    .add_connection(request.from_id, request.to_id)
                    .await?;
            }
            Ok(())
        })
        .await;
    }

    async fn fetch(&self) -> Result<ConnectionsState, RepoError> {
        let (viewer, pending) = tokio::try_join!(
            self.users.get(self.viewer),
            self.requests.pending_for(self.viewer),
        )?;

        let sender_ids: Vec<UserId> = pending.iter().map(|r| r.from_id).collect();
        let (connections, senders) = tokio::try_join!(
            self.users.get_many(&viewer.connections),
            self.users.get_many(&sender_ids),
        )?;

        Ok(ConnectionsState {
            connections,
            incoming: pending
                .into_iter()
                .zip(senders)
                .map(|(request, sender)| IncomingRequest { request, sender })
                .collect(),
        })
    }

    async fn mutate(&self, op: impl std::future::Future<Output = Result<(), RepoError>>) {
        self.state.send_replace(ViewState::Loading);
        match op.await {
            Ok(()) => self.load().await,
            Err(error) => {
                tracing::error!(%error, "connections mutation failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }
}

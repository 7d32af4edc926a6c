//! Connection request repository
//!
//! Requests share the review-status machine with job applications. The
//! actual linking of two users on accept is sequenced by the connections
//! screen, which calls [`crate::UserRepository::add_connection`] after a
//! successful decision.

use std::sync::Arc;

use worknet_backend::{collections, DocumentStore, Filter};
use worknet_domain::{ConnectionRequest, Decision, RequestId, ReviewStatus, UserId};

use crate::codec::{decode, decode_all, encode};
use crate::error::RepoError;

/// Repository over the `connection_requests` collection.
#[derive(Clone)]
pub struct ConnectionRepository {
    store: Arc<dyn DocumentStore>,
}

impl ConnectionRepository {
    /// Create a repository over `store`.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Send a connection request from `from` to `to`.
    ///
    /// # Errors
    /// - [`worknet_domain::DomainError::SelfReference`] for self-requests
    /// - [`RepoError::Conflict`] if a pending request between the pair
    ///   already exists in either direction
    pub async fn send(&self, from: UserId, to: UserId) -> Result<ConnectionRequest, RepoError> {
        let request = ConnectionRequest::new(from, to)?;

        let outgoing = self.pending_between(from, to).await?;
        let incoming = self.pending_between(to, from).await?;
        if outgoing || incoming {
            return Err(RepoError::conflict(format!(
                "a pending request between {from} and {to} already exists"
            )));
        }

        self.store
            .insert(
                collections::CONNECTION_REQUESTS,
                &request.id.to_string(),
                encode(&request)?,
            )
            .await?;
        tracing::info!(request = %request.id, "connection request sent");
        Ok(request)
    }

    /// Fetch one request.
    pub async fn get(&self, id: RequestId) -> Result<ConnectionRequest, RepoError> {
        let doc = self
            .store
            .get(collections::CONNECTION_REQUESTS, &id.to_string())
            .await?
            .ok_or_else(|| RepoError::not_found("connection request", id))?;
        decode(collections::CONNECTION_REQUESTS, doc)
    }

    /// Pending requests addressed to `user`, oldest first.
    pub async fn pending_for(&self, user: UserId) -> Result<Vec<ConnectionRequest>, RepoError> {
        let docs = self
            .store
            .query(
                collections::CONNECTION_REQUESTS,
                &Filter::field_eq("toId", user.to_string()),
            )
            .await?;
        let mut requests: Vec<ConnectionRequest> =
            decode_all(collections::CONNECTION_REQUESTS, docs)?;
        requests.retain(|r| r.status == ReviewStatus::Pending);
        requests.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(requests)
    }

    /// Apply the recipient's decision to a pending request.
    pub async fn decide(
        &self,
        id: RequestId,
        decision: Decision,
    ) -> Result<ConnectionRequest, RepoError> {
        let mut request = self.get(id).await?;
        request.decide(decision)?;
        self.store
            .update(
                collections::CONNECTION_REQUESTS,
                &id.to_string(),
                encode(&request)?,
            )
            .await?;
        tracing::info!(request = %id, status = ?request.status, "connection request decided");
        Ok(request)
    }

    async fn pending_between(&self, from: UserId, to: UserId) -> Result<bool, RepoError> {
        let docs = self
            .store
            .query(
                collections::CONNECTION_REQUESTS,
                &Filter::all()
                    .eq("fromId", from.to_string())
                    .eq("toId", to.to_string()),
            )
            .await?;
        let requests: Vec<ConnectionRequest> = decode_all(collections::CONNECTION_REQUESTS, docs)?;
        Ok(requests.iter().any(|r| r.status == ReviewStatus::Pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worknet_backend::MemoryBackend;
    use worknet_domain::DomainError;

    fn repo() -> ConnectionRepository {
        ConnectionRepository::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn duplicate_pending_request_conflicts_in_both_directions() {
        let repo = repo();
        let (a, b) = (UserId::new(), UserId::new());

        repo.send(a, b).await.unwrap();
        assert!(matches!(
            repo.send(a, b).await.unwrap_err(),
            RepoError::Conflict { .. }
        ));
        assert!(matches!(
            repo.send(b, a).await.unwrap_err(),
            RepoError::Conflict { .. }
        ));
    }

    #[tokio::test]
    async fn settled_request_allows_a_new_one() {
        let repo = repo();
        let (a, b) = (UserId::new(), UserId::new());

        let request = repo.send(a, b).await.unwrap();
        repo.decide(request.id, Decision::Reject).await.unwrap();

        // Rejection settles the pair; asking again is allowed.
        repo.send(a, b).await.unwrap();
    }

    #[tokio::test]
    async fn pending_for_hides_settled_requests() {
        let repo = repo();
        let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());

        let settled = repo.send(a, c).await.unwrap();
        repo.decide(settled.id, Decision::Accept).await.unwrap();
        let open = repo.send(b, c).await.unwrap();

        let pending = repo.pending_for(c).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, open.id);
    }

    #[tokio::test]
    async fn self_request_is_a_domain_error() {
        let repo = repo();
        let me = UserId::new();
        assert!(matches!(
            repo.send(me, me).await.unwrap_err(),
            RepoError::Domain(DomainError::SelfReference { .. })
        ));
    }

    #[tokio::test]
    async fn decided_request_is_terminal() {
        let repo = repo();
        let request = repo.send(UserId::new(), UserId::new()).await.unwrap();
        repo.decide(request.id, Decision::Accept).await.unwrap();
        assert!(matches!(
            repo.decide(request.id, Decision::Reject).await.unwrap_err(),
            RepoError::Domain(DomainError::InvalidTransition { .. })
        ));
    }
}

//! Connection requests
//!
//! Same lifecycle as job applications: `Pending -> {Accepted, Rejected}`.
//! Accepting a request is what links two users; the linking itself happens
//! in the repository layer, which updates both users' connection lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{RequestId, UserId};
use crate::status::{Decision, ReviewStatus};

/// A request from one user to connect with another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    /// Unique identifier.
    pub id: RequestId,
    /// User who sent the request.
    pub from_id: UserId,
    /// User being asked.
    pub to_id: UserId,
    /// Current lifecycle status.
    pub status: ReviewStatus,
    /// When the request was sent.
    pub created_at: DateTime<Utc>,
    /// When the recipient decided, if they have.
    #[serde(default)]
    pub decided_at: Option<DateTime<Utc>>,
}

impl ConnectionRequest {
    /// Create a pending request from `from_id` to `to_id`.
    ///
    /// # Errors
    /// Returns [`DomainError::SelfReference`] if both sides are the same
    /// user.
    pub fn new(from_id: UserId, to_id: UserId) -> Result<Self, DomainError> {
        if from_id == to_id {
            return Err(DomainError::SelfReference {
                action: "connection request",
            });
        }
        Ok(Self {
            id: RequestId::new(),
            from_id,
            to_id,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
            decided_at: None,
        })
    }

    /// Apply the recipient's decision.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidTransition`] if the request has
    /// already been decided.
    pub fn decide(&mut self, decision: Decision) -> Result<(), DomainError> {
        self.status = self.status.apply(decision)?;
        self.decided_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_request_is_rejected() {
        let me = UserId::new();
        let err = ConnectionRequest::new(me, me).unwrap_err();
        assert!(matches!(err, DomainError::SelfReference { .. }));
    }

    #[test]
    fn accepted_request_is_terminal() {
        let mut req = ConnectionRequest::new(UserId::new(), UserId::new()).unwrap();
        req.decide(Decision::Accept).unwrap();
        assert!(req.decide(Decision::Reject).is_err());
        assert_eq!(req.status, ReviewStatus::Accepted);
    }
}

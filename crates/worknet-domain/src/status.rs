//! Shared review-status state machine
//!
//! Job applications and connection requests share the same lifecycle:
//! `Pending -> {Accepted, Rejected}`, both outcomes terminal. The original
//! client never enforced terminality; this implementation rejects any
//! transition out of a terminal state.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lifecycle status of a reviewable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewStatus {
    /// Awaiting a decision from the reviewing party.
    Pending,
    /// Approved. Terminal.
    Accepted,
    /// Declined. Terminal.
    Rejected,
}

/// Decision a reviewer can make on a pending record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Approve the record.
    Accept,
    /// Decline the record.
    Reject,
}

impl Decision {
    /// Status this decision resolves to.
    #[inline]
    #[must_use]
    pub fn resolved_status(self) -> ReviewStatus {
        match self {
            Self::Accept => ReviewStatus::Accepted,
            Self::Reject => ReviewStatus::Rejected,
        }
    }
}

impl ReviewStatus {
    /// Whether this status admits no further transitions.
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Apply a reviewer decision.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidTransition`] if the status is already
    /// terminal.
    pub fn apply(self, decision: Decision) -> Result<Self, DomainError> {
        let to = decision.resolved_status();
        match self {
            Self::Pending => Ok(to),
            from => Err(DomainError::InvalidTransition { from, to }),
        }
    }
}

impl Default for ReviewStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_accepts() {
        assert_eq!(
            ReviewStatus::Pending.apply(Decision::Accept).unwrap(),
            ReviewStatus::Accepted
        );
    }

    #[test]
    fn pending_rejects() {
        assert_eq!(
            ReviewStatus::Pending.apply(Decision::Reject).unwrap(),
            ReviewStatus::Rejected
        );
    }

    #[test]
    fn terminal_states_are_frozen() {
        for terminal in [ReviewStatus::Accepted, ReviewStatus::Rejected] {
            for decision in [Decision::Accept, Decision::Reject] {
                let err = terminal.apply(decision).unwrap_err();
                assert!(matches!(err, DomainError::InvalidTransition { .. }));
            }
        }
    }

    #[test]
    fn wire_format_is_uppercase() {
        let json = serde_json::to_string(&ReviewStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
    }
}

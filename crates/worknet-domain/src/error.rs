//! Error types for domain-level validation
//!
//! These cover the invariants the client enforces on its own, before any
//! backend call is made: status-machine transitions, comment target
//! exclusivity, and identifier parsing.

use crate::status::ReviewStatus;

/// Domain validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A review-status transition out of a terminal state was attempted.
    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Status the record currently holds.
        from: ReviewStatus,
        /// Status the caller tried to move to.
        to: ReviewStatus,
    },

    /// A comment document carried both `postId` and `jobId`.
    #[error("comment references both a post and a job")]
    AmbiguousCommentTarget,

    /// A comment document carried neither `postId` nor `jobId`.
    #[error("comment references neither a post nor a job")]
    MissingCommentTarget,

    /// An identifier string was not a valid UUID.
    #[error("invalid {entity}: {value:?}")]
    InvalidId {
        /// Entity ID type that failed to parse.
        entity: &'static str,
        /// The offending input.
        value: String,
    },

    /// A user attempted to act on themselves where that makes no sense
    /// (self connection request, applying to their own job).
    #[error("{action} targeting self is not allowed")]
    SelfReference {
        /// Human-readable name of the rejected action.
        action: &'static str,
    },
}

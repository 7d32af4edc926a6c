//! Repository error type

use worknet_backend::BackendError;
use worknet_domain::DomainError;

/// Error returned by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The backend call failed.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// A domain invariant was violated.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A stored document could not be decoded into its entity type.
    #[error("corrupt document in '{collection}': {source}")]
    CorruptDocument {
        /// Collection the document came from.
        collection: &'static str,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind.
        entity: &'static str,
        /// Identifier looked up.
        id: String,
    },

    /// The operation conflicts with existing state (duplicate application,
    /// duplicate pending request, ...).
    #[error("conflict: {message}")]
    Conflict {
        /// What conflicted.
        message: String,
    },
}

impl RepoError {
    /// Whether retrying the same call may succeed.
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Backend(e) if e.is_transient())
    }

    /// Shorthand for a not-found error.
    #[inline]
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Shorthand for a conflict error.
    #[inline]
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

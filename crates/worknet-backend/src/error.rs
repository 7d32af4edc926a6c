//! Backend error taxonomy
//!
//! The original client collapsed every backend failure into a message
//! string. Here failures are typed, and transient failures are
//! distinguishable from permanent ones so callers can decide whether a
//! retry is even worth offering.

/// Error returned by backend capability handles.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The requested document does not exist.
    #[error("not found: {collection}/{id}")]
    NotFound {
        /// Collection queried.
        collection: String,
        /// Document ID queried.
        id: String,
    },

    /// A document with this ID already exists in the collection.
    #[error("already exists: {collection}/{id}")]
    AlreadyExists {
        /// Collection written to.
        collection: String,
        /// Conflicting document ID.
        id: String,
    },

    /// Email/password pair was not accepted.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No signed-in session where one is required.
    #[error("not signed in")]
    Unauthenticated,

    /// The session is not allowed to perform this operation.
    #[error("permission denied: {message}")]
    PermissionDenied {
        /// What was denied.
        message: String,
    },

    /// The backend is temporarily unreachable or overloaded.
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Transport-level detail.
        message: String,
    },

    /// A document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BackendError {
    /// Whether retrying the same call may succeed.
    ///
    /// Only [`BackendError::Unavailable`] is transient; everything else is
    /// a permanent outcome for the given input.
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Shorthand for a not-found error.
    #[inline]
    #[must_use]
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Shorthand for an unavailable error.
    #[inline]
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_is_transient() {
        assert!(BackendError::unavailable("maintenance").is_transient());
        assert!(!BackendError::not_found("users", "u1").is_transient());
        assert!(!BackendError::InvalidCredentials.is_transient());
    }
}

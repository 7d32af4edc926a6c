//! Document store capability
//!
//! The remote database stores schemaless JSON documents in named
//! collections and supports only equality filters. Anything richer than
//! that is client-side filtering in the repository layer.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BackendError;

/// A raw backend document.
pub type Document = Value;

/// Collection names used by the client.
pub mod collections {
    /// User profile documents.
    pub const USERS: &str = "users";
    /// Feed posts.
    pub const POSTS: &str = "posts";
    /// Job postings and work items.
    pub const JOBS: &str = "jobs";
    /// Saved-job join records.
    pub const SAVED_JOBS: &str = "saved_jobs";
    /// Job applications.
    pub const APPLICATIONS: &str = "applications";
    /// Comments on posts and jobs.
    pub const COMMENTS: &str = "comments";
    /// Notifications.
    pub const NOTIFICATIONS: &str = "notifications";
    /// Connection requests.
    pub const CONNECTION_REQUESTS: &str = "connection_requests";
    /// Match suggestions.
    pub const MATCHES: &str = "matches";
    /// Portfolios.
    pub const PORTFOLIOS: &str = "portfolios";
    /// Projects.
    pub const PROJECTS: &str = "projects";
    /// Project roles.
    pub const ROLES: &str = "roles";
    /// Announcements.
    pub const ANNOUNCEMENTS: &str = "announcements";
}

/// Conjunction of field-equality clauses.
///
/// This mirrors the only query shape the managed backend exposes to the
/// client (`field == value`, ANDed).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    /// Filter matching every document.
    #[inline]
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an equality clause, builder-style.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    /// Convenience constructor for a single-clause filter.
    #[inline]
    #[must_use]
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().eq(field, value)
    }

    /// Whether `doc` satisfies every clause.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, value)| doc.get(field) == Some(value))
    }

    /// Number of clauses.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the filter has no clauses.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Remote document database handle.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document, or `None` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, BackendError>;

    /// Insert a new document.
    ///
    /// # Errors
    /// Returns [`BackendError::AlreadyExists`] if the ID is taken.
    async fn insert(&self, collection: &str, id: &str, doc: Document)
        -> Result<(), BackendError>;

    /// Replace an existing document.
    ///
    /// # Errors
    /// Returns [`BackendError::NotFound`] if the document does not exist.
    async fn update(&self, collection: &str, id: &str, doc: Document)
        -> Result<(), BackendError>;

    /// Delete a document. Deleting a missing document is an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), BackendError>;

    /// Fetch all documents matching `filter`.
    async fn query(&self, collection: &str, filter: &Filter)
        -> Result<Vec<Document>, BackendError>;

    /// Full-collection scan.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, BackendError> {
        self.query(collection, &Filter::all()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_matches_conjunction() {
        let filter = Filter::all().eq("userId", "u1").eq("status", "PENDING");
        assert!(filter.matches(&json!({"userId": "u1", "status": "PENDING", "x": 1})));
        assert!(!filter.matches(&json!({"userId": "u1", "status": "ACCEPTED"})));
        assert!(!filter.matches(&json!({"status": "PENDING"})));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::all().matches(&json!({})));
        assert!(Filter::all().is_empty());
    }
}

//! Match suggestion repository
//!
//! A scan plus the pure ranking helper: filter to the requesting user,
//! order by score descending.

use std::sync::Arc;

use worknet_backend::{collections, DocumentStore};
use worknet_domain::{rank_for_user, MatchSuggestion, UserId};

use crate::codec::decode_all;
use crate::error::RepoError;

/// Repository over the `matches` collection.
#[derive(Clone)]
pub struct MatchRepository {
    store: Arc<dyn DocumentStore>,
}

impl MatchRepository {
    /// Create a repository over `store`.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Ranked suggestions for `user`, best first.
    pub async fn suggestions_for(&self, user: UserId) -> Result<Vec<MatchSuggestion>, RepoError> {
        let suggestions: Vec<MatchSuggestion> = decode_all(
            collections::MATCHES,
            self.store.list(collections::MATCHES).await?,
        )?;
        Ok(rank_for_user(suggestions, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worknet_backend::{fixtures, MemoryBackend};
    use worknet_domain::UserId;

    #[tokio::test]
    async fn fixture_suggestions_come_back_ranked() {
        let backend = Arc::new(MemoryBackend::new());
        fixtures::seed(&backend).await.unwrap();
        let repo = MatchRepository::new(backend);

        let ada = UserId::parse("00000000-0000-4000-8000-000000000001").unwrap();
        let suggestions = repo.suggestions_for(ada).await.unwrap();

        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].score >= suggestions[1].score);
        assert!(suggestions.iter().all(|s| s.user_id == ada));
    }

    #[tokio::test]
    async fn empty_collection_yields_no_suggestions() {
        let repo = MatchRepository::new(Arc::new(MemoryBackend::new()));
        assert!(repo
            .suggestions_for(UserId::new())
            .await
            .unwrap()
            .is_empty());
    }
}

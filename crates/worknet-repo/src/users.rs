//! User repository
//!
//! Profile reads and writes, plus the batch lookup with per-item fallback
//! that screens use to resolve display names: if one user in a batch fails
//! to load, that slot becomes [`User::placeholder`] instead of failing the
//! whole screen.

use std::sync::Arc;

use futures::future::join_all;
use worknet_backend::{collections, DocumentStore, Filter};
use worknet_domain::{User, UserId};

use crate::codec::{decode, decode_all, encode};
use crate::error::RepoError;

/// Repository over the `users` collection.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    /// Create a repository over `store`.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch one user.
    ///
    /// # Errors
    /// Returns [`RepoError::NotFound`] if the profile document is missing.
    pub async fn get(&self, id: UserId) -> Result<User, RepoError> {
        let doc = self
            .store
            .get(collections::USERS, &id.to_string())
            .await?
            .ok_or_else(|| RepoError::not_found("user", id))?;
        decode(collections::USERS, doc)
    }

    /// Fetch many users concurrently, substituting a placeholder record
    /// for any member that fails to load.
    ///
    /// The output preserves the input order. This is the one documented
    /// exception to all-or-nothing loads.
    pub async fn get_many(&self, ids: &[UserId]) -> Result<Vec<User>, RepoError> {
        let lookups = ids.iter().map(|id| {
            let id = *id;
            async move {
                match self.get(id).await {
                    Ok(user) => user,
                    Err(error) => {
                        tracing::warn!(user = %id, %error, "user lookup failed, using placeholder");
                        User::placeholder(id)
                    }
                }
            }
        });
        Ok(join_all(lookups).await)
    }

    /// Write a new profile document.
    pub async fn create(&self, user: &User) -> Result<(), RepoError> {
        self.store
            .insert(collections::USERS, &user.id.to_string(), encode(user)?)
            .await?;
        Ok(())
    }

    /// Replace an existing profile document.
    pub async fn update_profile(&self, user: &User) -> Result<(), RepoError> {
        self.store
            .update(collections::USERS, &user.id.to_string(), encode(user)?)
            .await?;
        Ok(())
    }

    /// Link two users in both directions.
    ///
    /// The backend offers no multi-document transaction, so the two writes
    /// are sequential. Both are idempotent, so a retry after a partial
    /// failure converges.
    pub async fn add_connection(&self, a: UserId, b: UserId) -> Result<(), RepoError> {
        let mut first = self.get(a).await?;
        first.add_connection(b);
        self.update_profile(&first).await?;

        let mut second = self.get(b).await?;
        second.add_connection(a);
        self.update_profile(&second).await?;
        Ok(())
    }

    /// Full directory scan, filtered client-side by `query` (matched
    /// against name, department, and skills).
    pub async fn search(&self, query: &str) -> Result<Vec<User>, RepoError> {
        let users: Vec<User> =
            decode_all(collections::USERS, self.store.list(collections::USERS).await?)?;
        Ok(users
            .into_iter()
            .filter(|u| u.matches_query(query))
            .collect())
    }

    /// Every user in the directory.
    pub async fn all(&self) -> Result<Vec<User>, RepoError> {
        self.search("").await
    }

    /// Users matching an exact department, using the backend's equality
    /// filter instead of a client-side scan.
    pub async fn in_department(&self, department: &str) -> Result<Vec<User>, RepoError> {
        let docs = self
            .store
            .query(
                collections::USERS,
                &Filter::field_eq("department", department),
            )
            .await?;
        decode_all(collections::USERS, docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worknet_backend::MemoryBackend;

    async fn repo_with(users: &[User]) -> UserRepository {
        let backend = Arc::new(MemoryBackend::new());
        let repo = UserRepository::new(backend);
        for user in users {
            repo.create(user).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn get_many_substitutes_placeholder_for_missing_users() {
        let ada = User::new(UserId::new(), "ada@example.com", "Ada");
        let repo = repo_with(&[ada.clone()]).await;

        let ghost = UserId::new();
        let users = repo.get_many(&[ada.id, ghost]).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].display_name, "Ada");
        assert_eq!(users[1].id, ghost);
        assert_eq!(users[1].display_name, "Unknown user");
    }

    #[tokio::test]
    async fn add_connection_links_both_sides() {
        let ada = User::new(UserId::new(), "ada@example.com", "Ada");
        let grace = User::new(UserId::new(), "grace@example.com", "Grace");
        let repo = repo_with(&[ada.clone(), grace.clone()]).await;

        repo.add_connection(ada.id, grace.id).await.unwrap();

        assert!(repo.get(ada.id).await.unwrap().is_connected_to(grace.id));
        assert!(repo.get(grace.id).await.unwrap().is_connected_to(ada.id));
    }

    #[tokio::test]
    async fn search_filters_client_side() {
        let mut ada = User::new(UserId::new(), "ada@example.com", "Ada");
        ada.skills = vec!["Rust".to_string()];
        let grace = User::new(UserId::new(), "grace@example.com", "Grace");
        let repo = repo_with(&[ada.clone(), grace]).await;

        let hits = repo.search("rust").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ada.id);

        assert_eq!(repo.all().await.unwrap().len(), 2);
    }
}

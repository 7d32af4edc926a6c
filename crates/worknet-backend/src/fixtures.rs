//! Bundled fixture catalog
//!
//! Static JSON shipped with the app, usable as a mock data source parallel
//! to the live backend. [`seed`] loads every file into a [`MemoryBackend`].

use serde_json::Value;

use crate::error::BackendError;
use crate::memory::MemoryBackend;
use crate::store::{collections, DocumentStore};

const USERS: &str = include_str!("../fixtures/users.json");
const MATCHES: &str = include_str!("../fixtures/matches.json");
const PORTFOLIOS: &str = include_str!("../fixtures/portfolios.json");
const PROJECTS: &str = include_str!("../fixtures/projects.json");
const ROLES: &str = include_str!("../fixtures/roles.json");
const ANNOUNCEMENTS: &str = include_str!("../fixtures/announcements.json");

/// One fixture file: the collection it seeds, its raw JSON, and the
/// document field that serves as the ID.
const CATALOG: &[(&str, &str, &str)] = &[
    (collections::USERS, USERS, "id"),
    (collections::MATCHES, MATCHES, "id"),
    (collections::PORTFOLIOS, PORTFOLIOS, "userId"),
    (collections::PROJECTS, PROJECTS, "id"),
    (collections::ROLES, ROLES, "id"),
    (collections::ANNOUNCEMENTS, ANNOUNCEMENTS, "id"),
];

/// Load the bundled catalog into `backend`.
///
/// # Errors
/// Returns a [`BackendError`] if a fixture file is malformed or a document
/// collides with one already present.
pub async fn seed(backend: &MemoryBackend) -> Result<(), BackendError> {
    for (collection, raw, id_field) in CATALOG {
        let docs: Vec<Value> = serde_json::from_str(raw)?;
        for doc in docs {
            let id = doc
                .get(id_field)
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    BackendError::Serialization(serde::de::Error::custom(format!(
                        "fixture document in '{collection}' missing '{id_field}'"
                    )))
                })?
                .to_string();
            backend.insert(collection, &id, doc).await?;
        }
        tracing::debug!(collection, "fixtures loaded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Filter;

    #[tokio::test]
    async fn seed_loads_every_collection() {
        let backend = MemoryBackend::new();
        seed(&backend).await.unwrap();

        assert_eq!(backend.collection_len(collections::USERS), 4);
        assert_eq!(backend.collection_len(collections::MATCHES), 4);
        assert_eq!(backend.collection_len(collections::PORTFOLIOS), 2);
        assert_eq!(backend.collection_len(collections::PROJECTS), 2);
        assert_eq!(backend.collection_len(collections::ROLES), 3);
        assert_eq!(backend.collection_len(collections::ANNOUNCEMENTS), 2);
    }

    #[tokio::test]
    async fn seeded_documents_are_queryable() {
        let backend = MemoryBackend::new();
        seed(&backend).await.unwrap();

        let ada_matches = backend
            .query(
                collections::MATCHES,
                &Filter::field_eq("userId", "00000000-0000-4000-8000-000000000001"),
            )
            .await
            .unwrap();
        assert_eq!(ada_matches.len(), 2);
    }

    #[tokio::test]
    async fn seeding_twice_collides() {
        let backend = MemoryBackend::new();
        seed(&backend).await.unwrap();
        assert!(seed(&backend).await.is_err());
    }
}

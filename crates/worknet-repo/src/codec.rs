//! Document encode/decode helpers shared by all repositories.

use serde::de::DeserializeOwned;
use serde::Serialize;
use worknet_backend::Document;

use crate::error::RepoError;

/// Decode a backend document into an entity record.
pub(crate) fn decode<T: DeserializeOwned>(
    collection: &'static str,
    doc: Document,
) -> Result<T, RepoError> {
    serde_json::from_value(doc).map_err(|source| RepoError::CorruptDocument { collection, source })
}

/// Decode a whole result set, failing on the first corrupt document.
pub(crate) fn decode_all<T: DeserializeOwned>(
    collection: &'static str,
    docs: Vec<Document>,
) -> Result<Vec<T>, RepoError> {
    docs.into_iter().map(|doc| decode(collection, doc)).collect()
}

/// Encode an entity record into a backend document.
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Document, RepoError> {
    serde_json::to_value(value)
        .map_err(|e| RepoError::Backend(worknet_backend::BackendError::Serialization(e)))
}

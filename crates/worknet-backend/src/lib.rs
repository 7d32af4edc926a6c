//! Backend capability handles for the Worknet client core
//!
//! The managed backend (document database, auth service, object storage,
//! preference store) is an external collaborator. This crate defines the
//! capability traits the rest of the client is written against, plus:
//! - [`MemoryBackend`]: a deterministic in-memory implementation of every
//!   capability, used by tests and offline/demo mode
//! - [`fixtures`]: the bundled JSON catalog that seeds the memory backend
//!
//! Handles are constructor-injected as `Arc<dyn …>`; no code in the
//! workspace reaches a backend client through a global.

pub mod auth;
pub mod error;
pub mod fixtures;
pub mod memory;
pub mod object_store;
pub mod prefs;
pub mod store;

pub use auth::{AuthService, Session};
pub use error::BackendError;
pub use memory::{MemoryBackend, SentEmail};
pub use object_store::{ObjectPath, ObjectStore};
pub use prefs::{PreferenceStore, Theme};
pub use store::{collections, Document, DocumentStore, Filter};

//! Injected capability handle bundle
//!
//! Screens are constructed from this bundle instead of reaching backend
//! clients through globals. For the in-memory backend one object serves
//! every capability; against a live backend each handle is its own client.

use std::sync::Arc;

use worknet_backend::{AuthService, DocumentStore, MemoryBackend, ObjectStore, PreferenceStore};

/// The backend capability handles a screen can be built from.
#[derive(Clone)]
pub struct Handles {
    /// Remote document database.
    pub store: Arc<dyn DocumentStore>,
    /// Remote authentication service.
    pub auth: Arc<dyn AuthService>,
    /// Remote object storage.
    pub objects: Arc<dyn ObjectStore>,
    /// Local preference store.
    pub prefs: Arc<dyn PreferenceStore>,
}

impl Handles {
    /// Bundle explicit handles.
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthService>,
        objects: Arc<dyn ObjectStore>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            store,
            auth,
            objects,
            prefs,
        }
    }

    /// Serve every capability from one in-memory backend.
    #[must_use]
    pub fn in_memory(backend: Arc<MemoryBackend>) -> Self {
        Self {
            store: backend.clone(),
            auth: backend.clone(),
            objects: backend.clone(),
            prefs: backend,
        }
    }
}

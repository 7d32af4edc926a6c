//! Shared test helpers for the Worknet workspace
//!
//! Seeded backends, sample entity builders, and a tracing hook for tests
//! that want log output.

#![allow(missing_docs)]

use std::sync::Arc;

use once_cell::sync::OnceCell;
use worknet_backend::{fixtures, MemoryBackend};
use worknet_domain::{Job, Post, User, UserId};
use worknet_repo::UserRepository;

/// Ada's fixture ID, present in every seeded backend.
pub const ADA: &str = "00000000-0000-4000-8000-000000000001";
/// Grace's fixture ID, present in every seeded backend.
pub const GRACE: &str = "00000000-0000-4000-8000-000000000002";

static TRACING: OnceCell<()> = OnceCell::new();

/// Install a compact tracing subscriber once per test binary. Honors
/// `RUST_LOG`; silent by default.
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .compact()
            .try_init();
    });
}

/// An empty in-memory backend.
#[must_use]
pub fn empty_backend() -> Arc<MemoryBackend> {
    Arc::new(MemoryBackend::new())
}

/// A backend seeded with the bundled fixture catalog.
pub async fn seeded_backend() -> Arc<MemoryBackend> {
    let backend = Arc::new(MemoryBackend::new());
    fixtures::seed(&backend).await.unwrap();
    backend
}

/// Parse a fixture user ID such as [`ADA`].
#[must_use]
pub fn fixture_user(id: &str) -> UserId {
    UserId::parse(id).unwrap()
}

/// A minimal user with the given name and an example.com email.
#[must_use]
pub fn sample_user(name: &str) -> User {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    User::new(UserId::new(), email, name)
}

/// Create a user document and return its record.
pub async fn create_user(backend: &Arc<MemoryBackend>, name: &str) -> User {
    let user = sample_user(name);
    let store: Arc<dyn worknet_backend::DocumentStore> = Arc::clone(backend) as _;
    UserRepository::new(store).create(&user).await.unwrap();
    user
}

/// A text-only post by `author`.
#[must_use]
pub fn sample_post(author: UserId, body: &str) -> Post {
    Post::new(author, body, None)
}

/// A job posting owned by `owner`.
#[must_use]
pub fn sample_posting(owner: UserId, title: &str) -> Job {
    Job::posting(owner, title)
}

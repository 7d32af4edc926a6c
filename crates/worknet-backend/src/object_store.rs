//! Object storage capability
//!
//! Image upload returning a public download URL, keyed by a generated
//! path: `posts/{userId}/{uuid}.jpg` and `profiles/{userId}/{uuid}.jpg`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::BackendError;

/// Storage key for an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Path for a post image owned by `user_id`.
    #[must_use]
    pub fn post_image(user_id: impl std::fmt::Display) -> Self {
        Self(format!("posts/{user_id}/{}.jpg", Uuid::new_v4()))
    }

    /// Path for a profile photo owned by `user_id`.
    #[must_use]
    pub fn profile_image(user_id: impl std::fmt::Display) -> Self {
        Self(format!("profiles/{user_id}/{}.jpg", Uuid::new_v4()))
    }

    /// The path as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remote object storage handle.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` under `path`, returning the public download URL.
    async fn put(
        &self,
        path: &ObjectPath,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_image_paths_are_scoped_to_the_user() {
        let path = ObjectPath::post_image("u1");
        assert!(path.as_str().starts_with("posts/u1/"));
        assert!(path.as_str().ends_with(".jpg"));
    }

    #[test]
    fn paths_are_unique_per_upload() {
        assert_ne!(ObjectPath::profile_image("u1"), ObjectPath::profile_image("u1"));
    }
}

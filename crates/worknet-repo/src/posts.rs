//! Post repository

use std::sync::Arc;

use worknet_backend::{collections, DocumentStore};
use worknet_domain::{Post, PostId, UserId};

use crate::codec::{decode, decode_all, encode};
use crate::error::RepoError;

/// Repository over the `posts` collection.
#[derive(Clone)]
pub struct PostRepository {
    store: Arc<dyn DocumentStore>,
}

impl PostRepository {
    /// Create a repository over `store`.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Full-collection scan, newest first.
    pub async fn feed(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> =
            decode_all(collections::POSTS, self.store.list(collections::POSTS).await?)?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    /// Fetch one post.
    pub async fn get(&self, id: PostId) -> Result<Post, RepoError> {
        let doc = self
            .store
            .get(collections::POSTS, &id.to_string())
            .await?
            .ok_or_else(|| RepoError::not_found("post", id))?;
        decode(collections::POSTS, doc)
    }

    /// Create a post.
    pub async fn create(&self, post: &Post) -> Result<(), RepoError> {
        self.store
            .insert(collections::POSTS, &post.id.to_string(), encode(post)?)
            .await?;
        Ok(())
    }

    /// Add `user` to the post's likes. Idempotent.
    pub async fn like(&self, id: PostId, user: UserId) -> Result<(), RepoError> {
        let mut post = self.get(id).await?;
        post.add_like(user);
        self.replace(&post).await
    }

    /// Remove `user` from the post's likes.
    pub async fn unlike(&self, id: PostId, user: UserId) -> Result<(), RepoError> {
        let mut post = self.get(id).await?;
        post.remove_like(user);
        self.replace(&post).await
    }

    async fn replace(&self, post: &Post) -> Result<(), RepoError> {
        self.store
            .update(collections::POSTS, &post.id.to_string(), encode(post)?)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worknet_backend::MemoryBackend;

    #[tokio::test]
    async fn feed_is_newest_first() {
        let repo = PostRepository::new(Arc::new(MemoryBackend::new()));
        let author = UserId::new();

        let mut old = Post::new(author, "old", None);
        old.created_at -= chrono::Duration::hours(2);
        let new = Post::new(author, "new", None);

        repo.create(&old).await.unwrap();
        repo.create(&new).await.unwrap();

        let feed = repo.feed().await.unwrap();
        assert_eq!(feed[0].body, "new");
        assert_eq!(feed[1].body, "old");
    }

    #[tokio::test]
    async fn like_persists() {
        let repo = PostRepository::new(Arc::new(MemoryBackend::new()));
        let post = Post::new(UserId::new(), "hello", None);
        repo.create(&post).await.unwrap();

        let fan = UserId::new();
        repo.like(post.id, fan).await.unwrap();
        assert!(repo.get(post.id).await.unwrap().liked_by(fan));

        repo.unlike(post.id, fan).await.unwrap();
        assert!(!repo.get(post.id).await.unwrap().liked_by(fan));
    }

    #[tokio::test]
    async fn liking_a_missing_post_is_not_found() {
        let repo = PostRepository::new(Arc::new(MemoryBackend::new()));
        let err = repo.like(PostId::new(), UserId::new()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound { entity: "post", .. }));
    }
}

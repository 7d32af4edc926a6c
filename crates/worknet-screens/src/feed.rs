//! Feed screen
//!
//! Posts with resolved authors, composing (with optional image upload),
//! likes, and commenting with its notification side effect.

use std::sync::Arc;

use tokio::sync::watch;
use worknet_backend::{ObjectPath, ObjectStore};
use worknet_domain::{
    Comment, CommentTarget, Notification, NotificationKind, NotificationRef, Post, PostId, User,
    UserId,
};
use worknet_repo::{
    CommentRepository, NotificationRepository, PostRepository, RepoError, UserRepository,
};

use crate::handles::Handles;
use crate::state::ViewState;

/// A post with its author resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    /// The post.
    pub post: Post,
    /// Author record (placeholder if the lookup failed).
    pub author: User,
}

/// A comment with its author resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentView {
    /// The comment.
    pub comment: Comment,
    /// Author record (placeholder if the lookup failed).
    pub author: User,
}

/// Everything the feed screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    /// Posts, newest first.
    pub items: Vec<FeedItem>,
}

/// Orchestrator for the feed screen.
pub struct FeedScreen {
    viewer: UserId,
    posts: PostRepository,
    users: UserRepository,
    comments: CommentRepository,
    notifications: NotificationRepository,
    objects: Arc<dyn ObjectStore>,
    state: watch::Sender<ViewState<FeedState>>,
}

impl FeedScreen {
    /// Create the screen for `viewer`.
    #[must_use]
    pub fn new(handles: &Handles, viewer: UserId) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            viewer,
            posts: PostRepository::new(Arc::clone(&handles.store)),
            users: UserRepository::new(Arc::clone(&handles.store)),
            comments: CommentRepository::new(Arc::clone(&handles.store)),
            notifications: NotificationRepository::new(Arc::clone(&handles.store)),
            objects: Arc::clone(&handles.objects),
            state,
        }
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState<FeedState>> {
        self.state.subscribe()
    }

    /// The current state record.
    #[must_use]
    pub fn current(&self) -> ViewState<FeedState> {
        self.state.borrow().clone()
    }

    /// Load (or reload) the feed.
    pub async fn load(&self) {
        self.state.send_replace(ViewState::Loading);
        match self.fetch().await {
            Ok(data) => {
                self.state.send_replace(ViewState::Ready(data));
            }
            Err(error) => {
                tracing::error!(%error, "feed load failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }

    /// Compose a post, uploading the image first if one is attached.
    pub async fn compose(&self, body: &str, image: Option<Vec<u8>>) {
        self.mutate(async {
            let image_url = match image {
                Some(bytes) => {
                    let path = ObjectPath::post_image(self.viewer);
                    Some(self.objects.put(&path, bytes, "image/jpeg").await?)
                }
                None => None,
            };
            let post = Post::new(self.viewer, body, image_url);
            self.posts.create(&post).await
        })
        .await;
    }

    /// Like the post if the viewer has not liked it, otherwise unlike.
    pub async fn toggle_like(&self, post: PostId) {
        self.mutate(async {
            let record = self.posts.get(post).await?;
            if record.liked_by(self.viewer) {
                self.posts.unlike(post, self.viewer).await
            } else {
                self.posts.like(post, self.viewer).await
            }
        })
        .await;
    }

    /// Comment on a post and notify its author.
    pub async fn comment(&self, post: PostId, body: &str) {
        self.mutate(async {
            let record = self.posts.get(post).await?;
            let comment = Comment::new(self.viewer, CommentTarget::Post(post), body);
            self.comments.create(&comment).await?;

            // Commenting on your own post needs no notification.
            if record.author_id != self.viewer {
                let notification = Notification::new(
                    self.viewer,
                    record.author_id,
                    NotificationKind::Comment,
                    Some(NotificationRef::Comment(comment.id)),
                );
                self.notifications.create(&notification).await?;
            }
            Ok(())
        })
        .await;
    }

    /// Comments under a post, oldest first, authors resolved.
    ///
    /// Fetched on demand when a post is expanded; not part of the feed
    /// state record.
    pub async fn comments_of(&self, post: PostId) -> Result<Vec<CommentView>, RepoError> {
        let comments = self.comments.for_target(CommentTarget::Post(post)).await?;
        let author_ids: Vec<UserId> = comments.iter().map(|c| c.author_id).collect();
        let authors = self.users.get_many(&author_ids).await?;
        Ok(comments
            .into_iter()
            .zip(authors)
            .map(|(comment, author)| CommentView { comment, author })
            .collect())
    }

    async fn fetch(&self) -> Result<FeedState, RepoError> {
        let posts = self.posts.feed().await?;
        let author_ids: Vec<UserId> = posts.iter().map(|p| p.author_id).collect();
        let authors = self.users.get_many(&author_ids).await?;
        let items = posts
            .into_iter()
            .zip(authors)
            .map(|(post, author)| FeedItem { post, author })
            .collect();
        Ok(FeedState { items })
    }

    async fn mutate(&self, op: impl std::future::Future<Output = Result<(), RepoError>>) {
        self.state.send_replace(ViewState::Loading);
        match op.await {
            Ok(()) => self.load().await,
            Err(error) => {
                tracing::error!(%error, "feed mutation failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }
}

//! Profile and settings screen
//!
//! The viewer's own profile, their portfolio and posts, and the local
//! theme preference. The only screen that touches the preference store.

use std::sync::Arc;

use tokio::sync::watch;
use worknet_backend::{ObjectPath, ObjectStore, PreferenceStore, Theme};
use worknet_domain::{Portfolio, Post, User, UserId};
use worknet_repo::{ContentRepository, PostRepository, RepoError, UserRepository};

use crate::handles::Handles;
use crate::state::ViewState;

/// Everything the profile screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    /// The viewer's profile record.
    pub user: User,
    /// The viewer's portfolio, if they have one.
    pub portfolio: Option<Portfolio>,
    /// The viewer's own posts, newest first.
    pub posts: Vec<Post>,
    /// The stored theme choice.
    pub theme: Theme,
}

/// Orchestrator for the profile screen.
pub struct ProfileScreen {
    viewer: UserId,
    users: UserRepository,
    content: ContentRepository,
    posts: PostRepository,
    objects: Arc<dyn ObjectStore>,
    prefs: Arc<dyn PreferenceStore>,
    state: watch::Sender<ViewState<ProfileState>>,
}

impl ProfileScreen {
    /// Create the screen for `viewer`.
    #[must_use]
    pub fn new(handles: &Handles, viewer: UserId) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            viewer,
            users: UserRepository::new(Arc::clone(&handles.store)),
            content: ContentRepository::new(Arc::clone(&handles.store)),
            posts: PostRepository::new(Arc::clone(&handles.store)),
            objects: Arc::clone(&handles.objects),
            prefs: Arc::clone(&handles.prefs),
            state,
        }
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState<ProfileState>> {
        self.state.subscribe()
    }

    /// The current state record.
    #[must_use]
    pub fn current(&self) -> ViewState<ProfileState> {
        self.state.borrow().clone()
    }

    /// Load (or reload) the screen.
    pub async fn load(&self) {
        self.state.send_replace(ViewState::Loading);
        match self.fetch().await {
            Ok(data) => {
                self.state.send_replace(ViewState::Ready(data));
            }
            Err(error) => {
                tracing::error!(%error, "profile load failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }

    /// Replace the viewer's profile record.
    pub async fn update_profile(&self, user: &User) {
        self.mutate(self.users.update_profile(user)).await;
    }

    /// Upload a new profile photo and point the profile at it.
    pub async fn upload_photo(&self, bytes: Vec<u8>) {
        self.mutate(async {
            let path = ObjectPath::profile_image(self.viewer);
            let url = self.objects.put(&path, bytes, "image/jpeg").await?;
            let mut user = self.users.get(self.viewer).await?;
            user.photo_url = Some(url);
            self.users.update_profile(&user).await
        })
        .await;
    }

    /// Persist a theme choice.
    pub async fn set_theme(&self, theme: Theme) {
        self.mutate(async {
            self.prefs.set_theme(theme).await?;
            Ok(())
        })
        .await;
    }

    async fn fetch(&self) -> Result<ProfileState, RepoError> {
        let (user, portfolio, feed, theme) = tokio::try_join!(
            self.users.get(self.viewer),
            self.content.portfolio_for(self.viewer),
            self.posts.feed(),
            async { Ok(self.prefs.theme().await?) },
        )?;

        // The backend has no by-author index; the feed scan is reused.
        let posts = feed
            .into_iter()
            .filter(|p| p.author_id == self.viewer)
            .collect();

        Ok(ProfileState {
            user,
            portfolio,
            posts,
            theme,
        })
    }

    async fn mutate(&self, op: impl std::future::Future<Output = Result<(), RepoError>>) {
        self.state.send_replace(ViewState::Loading);
        match op.await {
            Ok(()) => self.load().await,
            Err(error) => {
                tracing::error!(%error, "profile mutation failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }
}

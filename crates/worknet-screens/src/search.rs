//! Search and discovery screen
//!
//! The member directory with client-side query filtering, plus the
//! viewer's ranked match suggestions with resolved candidates.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use worknet_domain::{MatchSuggestion, User, UserId};
use worknet_repo::{MatchRepository, RepoError, UserRepository};

use crate::handles::Handles;
use crate::state::ViewState;

/// A match suggestion with its candidate resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchView {
    /// The suggestion.
    pub suggestion: MatchSuggestion,
    /// Candidate record (placeholder if the lookup failed).
    pub candidate: User,
}

/// Everything the search screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Directory members matching the current query.
    pub directory: Vec<User>,
    /// The viewer's match suggestions, best first.
    pub matches: Vec<MatchView>,
    /// The query the directory is filtered by.
    pub query: String,
}

/// Orchestrator for the search screen.
pub struct SearchScreen {
    viewer: UserId,
    users: UserRepository,
    matches: MatchRepository,
    state: watch::Sender<ViewState<SearchState>>,
}

impl SearchScreen {
    /// Create the screen for `viewer`.
    #[must_use]
    pub fn new(handles: &Handles, viewer: UserId) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            viewer,
            users: UserRepository::new(Arc::clone(&handles.store)),
            matches: MatchRepository::new(Arc::clone(&handles.store)),
            state,
        }
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState<SearchState>> {
        self.state.subscribe()
    }

    /// The current state record.
    #[must_use]
    pub fn current(&self) -> ViewState<SearchState> {
        self.state.borrow().clone()
    }

    /// Load (or reload) the screen with an empty query.
    pub async fn load(&self) {
        self.search("").await;
    }

    /// Reload the screen filtered by `query`.
    ///
    /// Filtering runs client-side against name, department, and skills;
    /// the viewer is excluded from their own results.
    pub async fn search(&self, query: &str) {
        self.state.send_replace(ViewState::Loading);
        match self.fetch(query).await {
            Ok(data) => {
                self.state.send_replace(ViewState::Ready(data));
            }
            Err(error) => {
                tracing::error!(%error, "search load failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }

    async fn fetch(&self, query: &str) -> Result<SearchState, RepoError> {
        let (mut directory, suggestions) = tokio::try_join!(
            self.users.search(query),
            self.matches.suggestions_for(self.viewer),
        )?;
        directory.retain(|u| u.id != self.viewer);
        directory.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        let candidate_ids: Vec<UserId> = suggestions.iter().map(|s| s.candidate_id).collect();
        let candidates = self.users.get_many(&candidate_ids).await?;
        let by_id: HashMap<UserId, User> = candidates.into_iter().map(|u| (u.id, u)).collect();

        Ok(SearchState {
            directory,
            matches: suggestions
                .into_iter()
                .map(|suggestion| MatchView {
                    candidate: by_id
                        .get(&suggestion.candidate_id)
                        .cloned()
                        .unwrap_or_else(|| User::placeholder(suggestion.candidate_id)),
                    suggestion,
                })
                .collect(),
            query: query.to_string(),
        })
    }
}

//! Screen orchestrators for the Worknet client core
//!
//! One orchestrator per screen. Each holds an observable state record
//! behind a `tokio::sync::watch` channel, sequences repository calls, and
//! republishes the whole record when they complete:
//!
//! ```text
//! UI action -> orchestrator method -> repository calls -> state merge -> publish
//! ```
//!
//! The per-screen state machine is `Loading -> {Ready, Failed}`, with every
//! mutation re-entering `Loading`. Failures become human-readable strings
//! at this boundary; underneath they stay typed. Independent lookups inside
//! one load are batched concurrently, but the state record is only replaced
//! once everything has completed.

pub mod connections;
pub mod feed;
pub mod handles;
pub mod jobs;
pub mod notifications;
pub mod profile;
pub mod search;
pub mod signup;
pub mod state;

pub use connections::{ConnectionsScreen, ConnectionsState, IncomingRequest};
pub use feed::{CommentView, FeedItem, FeedScreen, FeedState};
pub use handles::Handles;
pub use jobs::{ApplicationView, JobCard, JobsScreen, JobsState};
pub use notifications::{NotificationView, NotificationsScreen, NotificationsState};
pub use profile::{ProfileScreen, ProfileState};
pub use search::{MatchView, SearchScreen, SearchState};
pub use signup::{
    otp_is_valid, SignupError, SignupForm, SignupOutcome, SignupWizard, STEP_FIRST, STEP_LAST,
};
pub use state::ViewState;

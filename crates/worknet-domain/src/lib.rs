//! Domain records for the Worknet client core
//!
//! Defines the remote-backed entities and the pure client-side logic that
//! operates on them:
//! - Typed identifiers for every entity
//! - Entity records (users, posts, jobs, applications, comments,
//!   notifications, connection requests)
//! - The shared review-status state machine
//! - Filtering/sorting helpers (job board partition, match ranking)
//!
//! Nothing in this crate talks to a backend; everything here is data and
//! pure functions over it.

pub mod application;
pub mod comment;
pub mod connection;
pub mod directory;
pub mod error;
pub mod ids;
pub mod job;
pub mod matching;
pub mod notification;
pub mod post;
pub mod status;
pub mod user;

pub use application::JobApplication;
pub use comment::{Comment, CommentTarget};
pub use connection::ConnectionRequest;
pub use directory::{Announcement, Portfolio, PortfolioEntry, Project, ProjectRole};
pub use error::DomainError;
pub use ids::{
    ApplicationId, CollectionId, CommentId, JobId, NotificationId, PostId, ProjectId, RequestId,
    RoleId, UserId,
};
pub use job::{partition_jobs, Job, JobBoard, SavedJob};
pub use matching::{rank_for_user, MatchSuggestion};
pub use notification::{Notification, NotificationKind, NotificationRef};
pub use post::Post;
pub use status::{Decision, ReviewStatus};
pub use user::{Badge, User};

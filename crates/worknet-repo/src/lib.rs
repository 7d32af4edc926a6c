//! Repository adapters for the Worknet client core
//!
//! One repository per entity. Each method is a single backend call, or a
//! backend call plus client-side filtering/sorting; there are no retries
//! and no caching. Repositories hold constructor-injected `Arc<dyn …>`
//! capability handles and never reach a backend client through a global.

pub mod applications;
pub mod comments;
pub mod connections;
pub mod content;
pub mod error;
pub mod jobs;
pub mod matches;
pub mod notifications;
pub mod posts;
pub mod users;

mod codec;

pub use applications::ApplicationRepository;
pub use comments::CommentRepository;
pub use connections::ConnectionRepository;
pub use content::ContentRepository;
pub use error::RepoError;
pub use jobs::JobRepository;
pub use matches::MatchRepository;
pub use notifications::NotificationRepository;
pub use posts::PostRepository;
pub use users::UserRepository;

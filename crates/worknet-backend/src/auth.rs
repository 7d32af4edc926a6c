//! Authentication service capability
//!
//! Email/password accounts with a single current session. Account deletion
//! exists solely so the signup saga can compensate a partial failure.

use async_trait::async_trait;

use crate::error::BackendError;

/// ID of an auth account. Matches the profile document's user ID.
pub type AccountId = uuid::Uuid;

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Account the session belongs to.
    pub account_id: AccountId,
    /// Email the account was registered with.
    pub email: String,
    /// Whether the account's email address has been verified.
    pub email_verified: bool,
}

/// Remote authentication service handle.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and sign it in.
    ///
    /// # Errors
    /// Returns [`BackendError::AlreadyExists`] if the email is taken.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    /// Sign in with email and password.
    ///
    /// # Errors
    /// Returns [`BackendError::InvalidCredentials`] on a bad pair.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    /// Drop the current session. No-op when signed out.
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// The current session, if signed in.
    async fn current_session(&self) -> Result<Option<Session>, BackendError>;

    /// Send a password-reset email.
    async fn send_password_reset(&self, email: &str) -> Result<(), BackendError>;

    /// Send a verification email for the account.
    async fn send_email_verification(&self, account: AccountId) -> Result<(), BackendError>;

    /// Permanently delete an account. Used as the compensating action when
    /// the signup saga fails after account creation.
    async fn delete_account(&self, account: AccountId) -> Result<(), BackendError>;
}

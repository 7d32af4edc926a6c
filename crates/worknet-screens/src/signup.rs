//! Signup wizard
//!
//! A six-step form followed by a submit saga: account creation, optional
//! photo upload, profile document, verification email. The account write
//! is the pivot: a failure after it runs the compensating account delete
//! so no orphaned account survives a partial signup. A failed
//! verification email is the one non-fatal step.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use worknet_backend::{AuthService, BackendError, ObjectPath, ObjectStore, Session};
use worknet_domain::{User, UserId};
use worknet_repo::{RepoError, UserRepository};

use crate::handles::Handles;

/// First wizard step (credentials).
pub const STEP_FIRST: u8 = 1;
/// Last wizard step (review and submit).
pub const STEP_LAST: u8 = 6;

/// Whether `code` is a well-formed one-time code: exactly six ASCII
/// digits. There is no server-side check behind it.
#[must_use]
pub fn otp_is_valid(code: &str) -> bool {
    code.len() == 6 && code.chars().all(|c| c.is_ascii_digit())
}

/// Everything collected across the wizard steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    /// Sign-in email address.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Name shown across the app.
    pub display_name: String,
    /// Self-reported gender, optional.
    pub gender: Option<String>,
    /// Date of birth, optional.
    pub date_of_birth: Option<NaiveDate>,
    /// The one-time code the user typed in.
    pub otp: String,
    /// Profile photo bytes, if one was picked.
    pub photo: Option<Vec<u8>>,
}

/// Why a submit failed. The wizard stays on the last step so the user
/// can correct the form and retry.
#[derive(Debug, Error)]
pub enum SignupError {
    /// The email already has an account.
    #[error("an account with this email already exists")]
    EmailTaken,
    /// The one-time code is not six digits.
    #[error("the confirmation code must be 6 digits")]
    InvalidOtp,
    /// Account creation failed before anything else ran.
    #[error("account creation failed: {0}")]
    Account(#[source] BackendError),
    /// A step after account creation failed; the account was deleted
    /// again before this was returned.
    #[error("signup could not be completed: {0}")]
    RolledBack(#[source] RepoError),
}

/// What a successful submit produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupOutcome {
    /// The signed-in session.
    pub session: Session,
    /// The profile document that was written.
    pub user: User,
    /// False when the verification email could not be sent; everything
    /// else still succeeded and the user can request another later.
    pub verification_email_sent: bool,
}

/// Orchestrator for the signup flow.
pub struct SignupWizard {
    auth: Arc<dyn AuthService>,
    objects: Arc<dyn ObjectStore>,
    users: UserRepository,
    step: u8,
}

impl SignupWizard {
    /// Create a wizard positioned on the first step.
    #[must_use]
    pub fn new(handles: &Handles) -> Self {
        Self {
            auth: Arc::clone(&handles.auth),
            objects: Arc::clone(&handles.objects),
            users: UserRepository::new(Arc::clone(&handles.store)),
            step: STEP_FIRST,
        }
    }

    /// The step currently shown, in `STEP_FIRST..=STEP_LAST`.
    #[inline]
    #[must_use]
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Advance one step. Clamped at the last step.
    pub fn next_step(&mut self) {
        self.step = (self.step + 1).min(STEP_LAST);
    }

    /// Go back one step. Clamped at the first step.
    pub fn previous_step(&mut self) {
        self.step = (self.step - 1).max(STEP_FIRST);
    }

    /// Run the signup saga for a completed form.
    ///
    /// Order matters: the account is created first because it is the only
    /// step with a server-side uniqueness check, and everything after it
    /// is compensated by deleting the account again on failure.
    pub async fn submit(&self, form: &SignupForm) -> Result<SignupOutcome, SignupError> {
        if !otp_is_valid(&form.otp) {
            return Err(SignupError::InvalidOtp);
        }

        let session = match self.auth.sign_up(&form.email, &form.password).await {
            Ok(session) => session,
            Err(BackendError::AlreadyExists { .. }) => return Err(SignupError::EmailTaken),
            Err(error) => return Err(SignupError::Account(error)),
        };
        let user_id = UserId(session.account_id);

        let outcome = self.finish(form, &session, user_id).await;
        match outcome {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                if let Err(cleanup) = self.auth.delete_account(session.account_id).await {
                    tracing::error!(%cleanup, "compensating account delete failed");
                }
                tracing::warn!(%error, "signup rolled back");
                Err(SignupError::RolledBack(error))
            }
        }
    }

    async fn finish(
        &self,
        form: &SignupForm,
        session: &Session,
        user_id: UserId,
    ) -> Result<SignupOutcome, RepoError> {
        let photo_url = match &form.photo {
            Some(bytes) => {
                let path = ObjectPath::profile_image(user_id);
                Some(self.objects.put(&path, bytes.clone(), "image/jpeg").await?)
            }
            None => None,
        };

        let mut user = User::new(user_id, session.email.clone(), form.display_name.clone());
        user.gender = form.gender.clone();
        user.date_of_birth = form.date_of_birth;
        user.photo_url = photo_url;
        self.users.create(&user).await?;

        let verification_email_sent =
            match self.auth.send_email_verification(session.account_id).await {
                Ok(()) => true,
                Err(error) => {
                    tracing::warn!(%error, "verification email not sent");
                    false
                }
            };

        Ok(SignupOutcome {
            session: session.clone(),
            user,
            verification_email_sent,
        })
    }
}

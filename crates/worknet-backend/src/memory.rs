//! Deterministic in-memory backend
//!
//! Implements every capability trait over process-local maps. Used by the
//! test suite and by offline/demo mode, where it is seeded from the
//! bundled fixture catalog.
//!
//! Write failures can be injected per collection so saga and error-path
//! tests can exercise partial-failure behavior without a network.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::auth::{AccountId, AuthService, Session};
use crate::error::BackendError;
use crate::object_store::{ObjectPath, ObjectStore};
use crate::prefs::{PreferenceStore, Theme};
use crate::store::{Document, DocumentStore, Filter};

/// An email the backend "sent", recorded for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentEmail {
    /// Password-reset email to the given address.
    PasswordReset(String),
    /// Verification email for the given account.
    Verification(AccountId),
}

#[derive(Debug, Clone)]
struct Account {
    id: AccountId,
    email: String,
    password_digest: String,
    email_verified: bool,
}

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory implementation of all backend capabilities.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: DashMap<String, BTreeMap<String, Document>>,
    accounts: DashMap<String, Account>,
    session: Mutex<Option<Session>>,
    objects: DashMap<String, StoredObject>,
    theme: Mutex<Theme>,
    sent_emails: Mutex<Vec<SentEmail>>,
    failing_collections: DashSet<String>,
    fail_verification_emails: AtomicBool,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write to `collection` fail with
    /// [`BackendError::Unavailable`] until [`Self::heal`] is called.
    pub fn fail_writes(&self, collection: &str) {
        self.failing_collections.insert(collection.to_string());
    }

    /// Make verification-email sending fail until [`Self::heal`].
    pub fn fail_verification_emails(&self) {
        self.fail_verification_emails.store(true, Ordering::SeqCst);
    }

    /// Clear all injected failures.
    pub fn heal(&self) {
        self.failing_collections.clear();
        self.fail_verification_emails.store(false, Ordering::SeqCst);
    }

    /// Emails "sent" so far, oldest first.
    #[must_use]
    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent_emails.lock().clone()
    }

    /// Mark the account's email as verified, standing in for the user
    /// clicking the link in the verification email. No-op for unknown
    /// accounts.
    pub fn complete_email_verification(&self, account: AccountId) {
        for mut entry in self.accounts.iter_mut() {
            if entry.id == account {
                entry.email_verified = true;
                break;
            }
        }
    }

    /// Issue a 6-digit OTP code.
    ///
    /// There is no verification side: the signup flow's OTP check is a
    /// documented test-mode stub that accepts any 6-digit code.
    #[must_use]
    pub fn issue_otp(&self) -> String {
        format!("{:06}", rand::random_range(0..1_000_000u32))
    }

    /// Number of documents currently in `collection`.
    #[must_use]
    pub fn collection_len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map_or(0, |docs| docs.len())
    }

    /// Raw bytes of an uploaded object, if present.
    #[must_use]
    pub fn object_bytes(&self, path: &ObjectPath) -> Option<Vec<u8>> {
        self.objects.get(path.as_str()).map(|o| o.bytes.clone())
    }

    /// Content type of an uploaded object, if present.
    #[must_use]
    pub fn object_content_type(&self, path: &ObjectPath) -> Option<String> {
        self.objects
            .get(path.as_str())
            .map(|o| o.content_type.clone())
    }

    fn check_writable(&self, collection: &str) -> Result<(), BackendError> {
        if self.failing_collections.contains(collection) {
            return Err(BackendError::unavailable(format!(
                "writes to '{collection}' are failing (injected)"
            )));
        }
        Ok(())
    }

    fn digest(password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    fn session_for(account: &Account) -> Session {
        Session {
            account_id: account.id,
            email: account.email.clone(),
            email_verified: account.email_verified,
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, BackendError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned()))
    }

    async fn insert(
        &self,
        collection: &str,
        id: &str,
        doc: Document,
    ) -> Result<(), BackendError> {
        self.check_writable(collection)?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Err(BackendError::AlreadyExists {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        docs.insert(id.to_string(), doc);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        doc: Document,
    ) -> Result<(), BackendError> {
        self.check_writable(collection)?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        match docs.get_mut(id) {
            Some(slot) => {
                *slot = doc;
                Ok(())
            }
            None => Err(BackendError::not_found(collection, id)),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        self.check_writable(collection)?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        docs.remove(id)
            .map(|_| ())
            .ok_or_else(|| BackendError::not_found(collection, id))
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, BackendError> {
        Ok(self.collections.get(collection).map_or_else(Vec::new, |docs| {
            docs.values().filter(|d| filter.matches(d)).cloned().collect()
        }))
    }
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let key = email.trim().to_lowercase();
        if self.accounts.contains_key(&key) {
            return Err(BackendError::AlreadyExists {
                collection: "accounts".to_string(),
                id: key,
            });
        }
        let account = Account {
            id: Uuid::new_v4(),
            email: key.clone(),
            password_digest: Self::digest(password),
            email_verified: false,
        };
        let session = Self::session_for(&account);
        self.accounts.insert(key, account);
        *self.session.lock() = Some(session.clone());
        tracing::debug!(email = %session.email, "account created");
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let key = email.trim().to_lowercase();
        let account = self
            .accounts
            .get(&key)
            .ok_or(BackendError::InvalidCredentials)?;
        if account.password_digest != Self::digest(password) {
            return Err(BackendError::InvalidCredentials);
        }
        let session = Self::session_for(&account);
        *self.session.lock() = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        *self.session.lock() = None;
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, BackendError> {
        let session = self.session.lock().clone();
        // Re-read the account so the verified flag is never stale.
        Ok(session.and_then(|s| {
            self.accounts
                .get(&s.email)
                .map(|account| Self::session_for(&account))
        }))
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), BackendError> {
        let key = email.trim().to_lowercase();
        if !self.accounts.contains_key(&key) {
            return Err(BackendError::not_found("accounts", key));
        }
        self.sent_emails.lock().push(SentEmail::PasswordReset(key));
        Ok(())
    }

    async fn send_email_verification(&self, account: AccountId) -> Result<(), BackendError> {
        if self.fail_verification_emails.load(Ordering::SeqCst) {
            return Err(BackendError::unavailable(
                "verification emails are failing (injected)",
            ));
        }
        if !self.accounts.iter().any(|entry| entry.id == account) {
            return Err(BackendError::not_found("accounts", account.to_string()));
        }
        self.sent_emails.lock().push(SentEmail::Verification(account));
        Ok(())
    }

    async fn delete_account(&self, account: AccountId) -> Result<(), BackendError> {
        let key = self
            .accounts
            .iter()
            .find(|entry| entry.id == account)
            .map(|entry| entry.key().clone())
            .ok_or_else(|| BackendError::not_found("accounts", account.to_string()))?;
        self.accounts.remove(&key);

        let mut session = self.session.lock();
        if session.as_ref().is_some_and(|s| s.account_id == account) {
            *session = None;
        }
        tracing::debug!(%account, "account deleted");
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryBackend {
    async fn put(
        &self,
        path: &ObjectPath,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError> {
        self.objects.insert(
            path.as_str().to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("https://objects.worknet.local/{path}"))
    }
}

#[async_trait]
impl PreferenceStore for MemoryBackend {
    async fn theme(&self) -> Result<Theme, BackendError> {
        Ok(*self.theme.lock())
    }

    async fn set_theme(&self, theme: Theme) -> Result<(), BackendError> {
        *self.theme.lock() = theme;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_get_update_delete_roundtrip() {
        let backend = MemoryBackend::new();

        backend
            .insert("users", "u1", json!({"id": "u1", "displayName": "Ada"}))
            .await
            .unwrap();
        assert!(backend.get("users", "u1").await.unwrap().is_some());

        // Duplicate insert is rejected.
        let err = backend
            .insert("users", "u1", json!({"id": "u1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::AlreadyExists { .. }));

        backend
            .update("users", "u1", json!({"id": "u1", "displayName": "Ada L."}))
            .await
            .unwrap();
        let doc = backend.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(doc["displayName"], "Ada L.");

        backend.delete("users", "u1").await.unwrap();
        assert!(backend.get("users", "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn query_applies_equality_filter() {
        let backend = MemoryBackend::new();
        backend
            .insert("jobs", "j1", json!({"id": "j1", "userId": "u1"}))
            .await
            .unwrap();
        backend
            .insert("jobs", "j2", json!({"id": "j2", "userId": "u2"}))
            .await
            .unwrap();

        let hits = backend
            .query("jobs", &Filter::field_eq("userId", "u1"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["id"], "j1");
    }

    #[tokio::test]
    async fn injected_failures_hit_writes_but_not_reads() {
        let backend = MemoryBackend::new();
        backend
            .insert("posts", "p1", json!({"id": "p1"}))
            .await
            .unwrap();

        backend.fail_writes("posts");
        let err = backend
            .insert("posts", "p2", json!({"id": "p2"}))
            .await
            .unwrap_err();
        assert!(err.is_transient());
        assert!(backend.get("posts", "p1").await.unwrap().is_some());

        backend.heal();
        backend
            .insert("posts", "p2", json!({"id": "p2"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn auth_lifecycle() {
        let backend = MemoryBackend::new();

        let session = backend.sign_up("Ada@Example.com", "hunter2").await.unwrap();
        assert!(!session.email_verified);
        assert_eq!(session.email, "ada@example.com");

        // Wrong password.
        assert!(matches!(
            backend.sign_in("ada@example.com", "nope").await,
            Err(BackendError::InvalidCredentials)
        ));

        // Sending the email does not verify anything by itself.
        backend
            .send_email_verification(session.account_id)
            .await
            .unwrap();
        let current = backend.current_session().await.unwrap().unwrap();
        assert!(!current.email_verified);
        assert_eq!(
            backend.sent_emails(),
            vec![SentEmail::Verification(session.account_id)]
        );

        // Verification completes when the user follows the link.
        backend.complete_email_verification(session.account_id);
        let current = backend.current_session().await.unwrap().unwrap();
        assert!(current.email_verified);

        backend.sign_out().await.unwrap();
        assert!(backend.current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_account_clears_session() {
        let backend = MemoryBackend::new();
        let session = backend.sign_up("b@example.com", "pw").await.unwrap();
        backend.delete_account(session.account_id).await.unwrap();
        assert!(backend.current_session().await.unwrap().is_none());
        assert!(matches!(
            backend.sign_in("b@example.com", "pw").await,
            Err(BackendError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn object_upload_returns_public_url() {
        let backend = MemoryBackend::new();
        let path = ObjectPath::post_image("u1");
        let url = backend
            .put(&path, vec![0xff, 0xd8], "image/jpeg")
            .await
            .unwrap();
        assert!(url.contains(path.as_str()));
        assert_eq!(backend.object_bytes(&path).unwrap(), vec![0xff, 0xd8]);
        assert_eq!(
            backend.object_content_type(&path).unwrap(),
            "image/jpeg"
        );
    }

    #[tokio::test]
    async fn theme_preference_persists() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.theme().await.unwrap(), Theme::Light);
        backend.set_theme(Theme::Dark).await.unwrap();
        assert_eq!(backend.theme().await.unwrap(), Theme::Dark);
    }

    #[test]
    fn otp_is_six_digits() {
        let backend = MemoryBackend::new();
        for _ in 0..32 {
            let otp = backend.issue_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

//! User records
//!
//! A user is the identity plus profile attributes plus the social-graph
//! edge list. Users are created on signup and mutated by the
//! profile-settings flow; they are never hard-deleted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// A member of the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Sign-in email address.
    pub email: String,
    /// Name shown across the app.
    pub display_name: String,
    /// Department or team the user belongs to.
    #[serde(default)]
    pub department: Option<String>,
    /// Skills the user lists on their profile.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Interests used for match suggestions.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Availability score in `[0.0, 1.0]`, set from profile settings.
    #[serde(default)]
    pub availability: f64,
    /// IDs of users this user is connected to.
    #[serde(default)]
    pub connections: Vec<UserId>,
    /// Badges earned on the platform.
    #[serde(default)]
    pub badges: Vec<Badge>,
    /// Public URL of the profile photo, if uploaded.
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Self-reported gender, collected during signup.
    #[serde(default)]
    pub gender: Option<String>,
    /// Date of birth, collected during signup.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// When the profile document was created.
    pub created_at: DateTime<Utc>,
}

/// A badge shown on a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Short badge label, e.g. `"Mentor"`.
    pub label: String,
    /// When the badge was awarded.
    pub awarded_at: DateTime<Utc>,
}

impl User {
    /// Create a minimal user record, as written at the end of signup.
    #[must_use]
    pub fn new(id: UserId, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
            department: None,
            skills: Vec::new(),
            interests: Vec::new(),
            availability: 0.0,
            connections: Vec::new(),
            badges: Vec::new(),
            photo_url: None,
            gender: None,
            date_of_birth: None,
            created_at: Utc::now(),
        }
    }

    /// Fallback record used when a batch lookup fails for one member.
    ///
    /// Screens resolving display names for a list of records substitute
    /// this placeholder instead of failing the whole screen.
    #[must_use]
    pub fn placeholder(id: UserId) -> Self {
        let mut user = Self::new(id, "", "Unknown user");
        user.created_at = DateTime::<Utc>::UNIX_EPOCH;
        user
    }

    /// Whether `other` is in this user's connection list.
    #[inline]
    #[must_use]
    pub fn is_connected_to(&self, other: UserId) -> bool {
        self.connections.contains(&other)
    }

    /// Add a connection edge. Idempotent.
    pub fn add_connection(&mut self, other: UserId) {
        if other != self.id && !self.connections.contains(&other) {
            self.connections.push(other);
        }
    }

    /// Case-insensitive match against name, department, and skills, used
    /// by the client-side directory search.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.display_name.to_lowercase().contains(&query)
            || self
                .department
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
            || self.skills.iter().any(|s| s.to_lowercase().contains(&query))
    }
}

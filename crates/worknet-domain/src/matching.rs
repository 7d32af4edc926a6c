//! Match suggestions
//!
//! Suggestions are scored server-side (or by the bundled fixtures); the
//! client's only job is to filter them to the requesting user and order
//! them by score, highest first.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// A scored suggestion that `user_id` should connect with `candidate_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSuggestion {
    /// Suggestion identifier, unique per (user, candidate) pair.
    pub id: String,
    /// User the suggestion is for.
    pub user_id: UserId,
    /// Suggested connection.
    pub candidate_id: UserId,
    /// Match score; higher is better.
    pub score: f64,
    /// Skills the two users have in common.
    #[serde(default)]
    pub shared_skills: Vec<String>,
}

/// Filter `suggestions` to those addressed to `user_id`, ordered by score
/// descending.
///
/// Ordering uses [`f64::total_cmp`], so NaN scores sink to the end instead
/// of poisoning the sort. Equal scores keep their input order.
#[must_use]
pub fn rank_for_user(suggestions: Vec<MatchSuggestion>, user_id: UserId) -> Vec<MatchSuggestion> {
    let mut ranked: Vec<_> = suggestions
        .into_iter()
        .filter(|s| s.user_id == user_id)
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

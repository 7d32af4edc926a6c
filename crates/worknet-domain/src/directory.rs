//! Directory records backed by the bundled fixture catalog
//!
//! Portfolios, projects, project roles, and announcements ship as static
//! JSON alongside the app and are also servable from the live backend.
//! They are read-only from the client's point of view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ProjectId, RoleId, UserId};

/// A user's portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Owner of the portfolio.
    pub user_id: UserId,
    /// One-line headline shown under the user's name.
    #[serde(default)]
    pub headline: String,
    /// External links (personal site, code hosting, ...).
    #[serde(default)]
    pub links: Vec<String>,
    /// Work samples.
    #[serde(default)]
    pub entries: Vec<PortfolioEntry>,
}

/// A single work sample in a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    /// Entry title.
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Public URL of an illustration image, if any.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// An internal project users can take roles on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// User leading the project.
    pub owner_id: UserId,
}

/// An open role on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRole {
    /// Unique identifier.
    pub id: RoleId,
    /// Project the role belongs to.
    pub project_id: ProjectId,
    /// Role title.
    pub title: String,
    /// Skills the role asks for.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A platform-wide announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Unique identifier.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
    /// When the announcement was posted.
    pub posted_at: DateTime<Utc>,
}

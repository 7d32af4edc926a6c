//! Directory content repository
//!
//! Read-only access to portfolios, projects, project roles, and
//! announcements. Roles are filtered client-side by project, matching the
//! backend's equality-only query surface.

use std::sync::Arc;

use worknet_backend::{collections, DocumentStore, Filter};
use worknet_domain::{Announcement, Portfolio, Project, ProjectId, ProjectRole, UserId};

use crate::codec::{decode, decode_all};
use crate::error::RepoError;

/// Repository over the fixture-backed directory collections.
#[derive(Clone)]
pub struct ContentRepository {
    store: Arc<dyn DocumentStore>,
}

impl ContentRepository {
    /// Create a repository over `store`.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// A user's portfolio, if they have one.
    pub async fn portfolio_for(&self, user: UserId) -> Result<Option<Portfolio>, RepoError> {
        match self
            .store
            .get(collections::PORTFOLIOS, &user.to_string())
            .await?
        {
            Some(doc) => Ok(Some(decode(collections::PORTFOLIOS, doc)?)),
            None => Ok(None),
        }
    }

    /// Every project.
    pub async fn projects(&self) -> Result<Vec<Project>, RepoError> {
        decode_all(
            collections::PROJECTS,
            self.store.list(collections::PROJECTS).await?,
        )
    }

    /// Open roles on `project`.
    pub async fn roles_for_project(
        &self,
        project: ProjectId,
    ) -> Result<Vec<ProjectRole>, RepoError> {
        let docs = self
            .store
            .query(
                collections::ROLES,
                &Filter::field_eq("projectId", project.to_string()),
            )
            .await?;
        decode_all(collections::ROLES, docs)
    }

    /// Platform announcements, newest first.
    pub async fn announcements(&self) -> Result<Vec<Announcement>, RepoError> {
        let mut announcements: Vec<Announcement> = decode_all(
            collections::ANNOUNCEMENTS,
            self.store.list(collections::ANNOUNCEMENTS).await?,
        )?;
        announcements.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(announcements)
    }
}

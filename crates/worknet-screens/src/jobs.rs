//! Jobs screen
//!
//! The viewer's job board (recommended/saved partition), their own
//! applications, and the owner-side inbox of pending applications.
//! Accepting an application notifies the applicant.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use worknet_domain::{
    ApplicationId, Decision, Job, JobApplication, JobId, Notification, NotificationKind,
    NotificationRef, User, UserId,
};
use worknet_repo::{
    ApplicationRepository, JobRepository, NotificationRepository, RepoError, UserRepository,
};

use crate::handles::Handles;
use crate::state::ViewState;

/// A job with its owner resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct JobCard {
    /// The job.
    pub job: Job,
    /// Owner record (placeholder if the lookup failed).
    pub owner: User,
}

/// An application with the other party resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationView {
    /// The application.
    pub application: JobApplication,
    /// For the applicant's list this is the job owner; for the owner's
    /// inbox it is the applicant.
    pub other_party: User,
}

/// Everything the jobs screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobsState {
    /// Postings recommended to the viewer.
    pub recommended: Vec<JobCard>,
    /// Postings the viewer saved.
    pub saved: Vec<JobCard>,
    /// The viewer's own applications.
    pub my_applications: Vec<ApplicationView>,
    /// Pending applications to the viewer's postings.
    pub inbox: Vec<ApplicationView>,
}

/// Orchestrator for the jobs screen.
pub struct JobsScreen {
    viewer: UserId,
    jobs: JobRepository,
    applications: ApplicationRepository,
    users: UserRepository,
    notifications: NotificationRepository,
    state: watch::Sender<ViewState<JobsState>>,
}

impl JobsScreen {
    /// Create the screen for `viewer`.
    #[must_use]
    pub fn new(handles: &Handles, viewer: UserId) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            viewer,
            jobs: JobRepository::new(Arc::clone(&handles.store)),
            applications: ApplicationRepository::new(Arc::clone(&handles.store)),
            users: UserRepository::new(Arc::clone(&handles.store)),
            notifications: NotificationRepository::new(Arc::clone(&handles.store)),
            state,
        }
    }

    /// Subscribe to state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState<JobsState>> {
        self.state.subscribe()
    }

    /// The current state record.
    #[must_use]
    pub fn current(&self) -> ViewState<JobsState> {
        self.state.borrow().clone()
    }

    /// Load (or reload) the screen.
    pub async fn load(&self) {
        self.state.send_replace(ViewState::Loading);
        match self.fetch().await {
            Ok(data) => {
                self.state.send_replace(ViewState::Ready(data));
            }
            Err(error) => {
                tracing::error!(%error, "jobs load failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }

    /// Save a posting for later.
    pub async fn save(&self, job: JobId) {
        self.mutate(self.jobs.save(self.viewer, job)).await;
    }

    /// Remove a posting from the saved list.
    pub async fn unsave(&self, job: JobId) {
        self.mutate(self.jobs.unsave(self.viewer, job)).await;
    }

    /// Apply to a posting.
    pub async fn apply(&self, job: JobId) {
        self.mutate(async {
            self.applications.apply(job, self.viewer).await?;
            Ok(())
        })
        .await;
    }

    /// Publish a new job owned by the viewer.
    pub async fn post_job(&self, job: &Job) {
        self.mutate(self.jobs.create(job)).await;
    }

    /// Decide a pending application to one of the viewer's postings.
    ///
    /// Accepting notifies the applicant with an invite.
    pub async fn decide_application(&self, id: ApplicationId, decision: Decision) {
        self.mutate(async {
            let application = self.applications.decide(id, decision).await?;
            if decision == Decision::Accept {
                let notification = Notification::new(
                    self.viewer,
                    application.applicant_id,
                    NotificationKind::Invite,
                    Some(NotificationRef::Application(application.id)),
                );
                self.notifications.create(&notification).await?;
            }
            Ok(())
        })
        .await;
    }

    async fn fetch(&self) -> Result<JobsState, RepoError> {
        // Board, own applications, and inbox are independent round trips.
        let (board, my_applications, inbox) = tokio::try_join!(
            self.jobs.board_for(self.viewer),
            self.applications.for_applicant(self.viewer),
            self.applications.inbox_for(self.viewer),
        )?;

        // One batched lookup resolves every referenced user.
        let mut ids: Vec<UserId> = Vec::new();
        ids.extend(board.recommended.iter().map(|j| j.user_id));
        ids.extend(board.saved.iter().map(|j| j.user_id));
        ids.extend(my_applications.iter().map(|a| a.job_owner_id));
        ids.extend(inbox.iter().map(|a| a.applicant_id));
        ids.sort_unstable();
        ids.dedup();

        let users = self.users.get_many(&ids).await?;
        let by_id: HashMap<UserId, User> = users.into_iter().map(|u| (u.id, u)).collect();
        let resolve = |id: UserId| by_id.get(&id).cloned().unwrap_or_else(|| User::placeholder(id));

        Ok(JobsState {
            recommended: board
                .recommended
                .into_iter()
                .map(|job| JobCard {
                    owner: resolve(job.user_id),
                    job,
                })
                .collect(),
            saved: board
                .saved
                .into_iter()
                .map(|job| JobCard {
                    owner: resolve(job.user_id),
                    job,
                })
                .collect(),
            my_applications: my_applications
                .into_iter()
                .map(|application| ApplicationView {
                    other_party: resolve(application.job_owner_id),
                    application,
                })
                .collect(),
            inbox: inbox
                .into_iter()
                .map(|application| ApplicationView {
                    other_party: resolve(application.applicant_id),
                    application,
                })
                .collect(),
        })
    }

    async fn mutate(&self, op: impl std::future::Future<Output = Result<(), RepoError>>) {
        self.state.send_replace(ViewState::Loading);
        match op.await {
            Ok(()) => self.load().await,
            Err(error) => {
                tracing::error!(%error, "jobs mutation failed");
                self.state.send_replace(ViewState::Failed(error.to_string()));
            }
        }
    }
}

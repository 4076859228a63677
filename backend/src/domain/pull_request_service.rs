//! Pull request lifecycle service.
//!
//! Implements [`PullRequestLifecycle`] over the user and pull request stores:
//! reviewer assignment on creation, idempotent merge, reviewer reassignment
//! and the per-user review listing. Every store call is bounded by a
//! [`StoreDeadline`] and issued sequentially.

use std::slice;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CreatePullRequestRequest, PullRequestLifecycle, PullRequestRepository, ReassignmentOutcome,
    UserRepository,
};
use crate::domain::{
    DomainError, Error, PullRequest, PullRequestDraft, PullRequestId, RandomReviewerSelector,
    ReviewerSelector, StoreDeadline, User, UserId,
};

/// Reviewers assigned to a new pull request unless configured otherwise.
pub const DEFAULT_MAX_REVIEWERS: usize = 2;

fn no_candidate(pull_request_id: &PullRequestId, old_reviewer: &UserId) -> Error {
    warn!(
        pull_request_id = %pull_request_id,
        old_reviewer = %old_reviewer,
        "no replacement reviewer available"
    );
    DomainError::no_candidate("no active replacement candidate in team").into()
}

fn user_not_found() -> Error {
    DomainError::not_found("user not found").into()
}

/// Pull request service implementing the lifecycle driving port.
#[derive(Clone)]
pub struct PullRequestService<U, P> {
    users: Arc<U>,
    pull_requests: Arc<P>,
    selector: Arc<dyn ReviewerSelector>,
    clock: Arc<dyn Clock>,
    max_reviewers: usize,
    deadline: StoreDeadline,
}

impl<U, P> PullRequestService<U, P> {
    /// Create a service with random selection, two reviewers per pull
    /// request and the default store deadline.
    pub fn new(users: Arc<U>, pull_requests: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            pull_requests,
            selector: Arc::new(RandomReviewerSelector),
            clock,
            max_reviewers: DEFAULT_MAX_REVIEWERS,
            deadline: StoreDeadline::default(),
        }
    }

    /// Replace the reviewer selection strategy.
    #[must_use]
    pub fn with_selector(mut self, selector: Arc<dyn ReviewerSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Set how many reviewers a new pull request receives.
    #[must_use]
    pub fn with_max_reviewers(mut self, max_reviewers: usize) -> Self {
        self.max_reviewers = max_reviewers;
        self
    }

    /// Set the bound applied to every store call.
    #[must_use]
    pub fn with_store_deadline(mut self, deadline: StoreDeadline) -> Self {
        self.deadline = deadline;
        self
    }
}

impl<U, P> PullRequestService<U, P>
where
    U: UserRepository,
    P: PullRequestRepository,
{
    async fn load_pull_request(&self, id: &PullRequestId) -> Result<PullRequest, Error> {
        self.deadline
            .call("load pull request", self.pull_requests.find_by_id(id))
            .await?
            .ok_or_else(|| DomainError::not_found("pull request not found").into())
    }

    async fn load_user(&self, id: &UserId) -> Result<User, Error> {
        self.deadline
            .call("load user", self.users.find_by_id(id))
            .await?
            .ok_or_else(user_not_found)
    }
}

#[async_trait]
impl<U, P> PullRequestLifecycle for PullRequestService<U, P>
where
    U: UserRepository,
    P: PullRequestRepository,
{
    async fn create_pull_request(
        &self,
        request: CreatePullRequestRequest,
    ) -> Result<PullRequest, Error> {
        let CreatePullRequestRequest {
            pull_request_id,
            pull_request_name,
            author_id,
        } = request;

        let taken = self
            .deadline
            .call(
                "check pull request id",
                self.pull_requests.exists(&pull_request_id),
            )
            .await?;
        if taken {
            return Err(DomainError::pr_exists("PR id already exists").into());
        }

        let author = self.load_user(&author_id).await?;
        let candidates = self
            .deadline
            .call(
                "list reviewer candidates",
                self.users
                    .list_active_in_team_excluding(author.team_name(), slice::from_ref(&author_id)),
            )
            .await?;
        let reviewers = self.selector.select(&candidates, self.max_reviewers);
        debug!(
            pull_request_id = %pull_request_id,
            candidates = candidates.len(),
            selected = reviewers.len(),
            "selected initial reviewers"
        );

        let pull_request = PullRequest::open(PullRequestDraft {
            id: pull_request_id,
            name: pull_request_name,
            author_id,
            reviewers: reviewers.into_iter().collect(),
            created_at: self.clock.utc(),
        });
        self.deadline
            .call(
                "create pull request",
                self.pull_requests.create(&pull_request),
            )
            .await?;

        info!(
            pull_request_id = %pull_request.id(),
            author_id = %pull_request.author_id(),
            reviewers = pull_request.reviewers().len(),
            "pull request opened"
        );
        Ok(pull_request)
    }

    async fn merge_pull_request(&self, id: &PullRequestId) -> Result<PullRequest, Error> {
        let current = self.load_pull_request(id).await?;
        if current.is_merged() {
            debug!(pull_request_id = %id, "pull request already merged");
            return Ok(current);
        }

        let transitioned = self
            .deadline
            .call(
                "merge pull request",
                self.pull_requests.set_merged(id, self.clock.utc()),
            )
            .await?;
        if transitioned {
            info!(pull_request_id = %id, "pull request merged");
        } else {
            debug!(pull_request_id = %id, "pull request merged concurrently");
        }

        self.load_pull_request(id).await
    }

    async fn reassign_reviewer(
        &self,
        id: &PullRequestId,
        old_reviewer: &UserId,
    ) -> Result<ReassignmentOutcome, Error> {
        let pull_request = self.load_pull_request(id).await?;
        if pull_request.is_merged() {
            return Err(DomainError::pr_merged("cannot reassign on merged PR").into());
        }
        if !pull_request.has_reviewer(old_reviewer) {
            return Err(DomainError::not_assigned("reviewer is not assigned to this PR").into());
        }

        let reviewer = self.load_user(old_reviewer).await?;
        let excluded: Vec<UserId> = pull_request
            .reviewers()
            .iter()
            .chain(slice::from_ref(pull_request.author_id()))
            .cloned()
            .collect();
        let candidates = self
            .deadline
            .call(
                "list replacement candidates",
                self.users
                    .list_active_in_team_excluding(reviewer.team_name(), &excluded),
            )
            .await?;
        if candidates.is_empty() {
            return Err(no_candidate(id, old_reviewer));
        }

        let replacement = self
            .selector
            .select(&candidates, 1)
            .into_iter()
            .next()
            .ok_or_else(|| no_candidate(id, old_reviewer))?;

        self.deadline
            .call(
                "replace reviewer",
                self.pull_requests
                    .replace_reviewer(id, old_reviewer, &replacement),
            )
            .await?;
        info!(
            pull_request_id = %id,
            old_reviewer = %old_reviewer,
            new_reviewer = %replacement,
            "reviewer reassigned"
        );

        let refreshed = self.load_pull_request(id).await?;
        Ok(ReassignmentOutcome {
            pull_request: refreshed,
            replaced_by: replacement,
        })
    }

    async fn user_reviews(&self, user_id: &UserId) -> Result<Vec<PullRequest>, Error> {
        let known = self
            .deadline
            .call("check user", self.users.exists(user_id))
            .await?;
        if !known {
            return Err(user_not_found());
        }

        let ids = self
            .deadline
            .call(
                "list reviewed pull requests",
                self.pull_requests.list_ids_by_reviewer(user_id),
            )
            .await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.deadline
            .call("load pull requests", self.pull_requests.find_by_ids(&ids))
            .await
    }
}

#[cfg(test)]
#[path = "pull_request_service_tests.rs"]
mod tests;

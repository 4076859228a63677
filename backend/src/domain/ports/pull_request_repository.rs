//! Port for pull request persistence and reviewer assignment.
//!
//! Adapters own the atomic rules a pre-check cannot guarantee: unique ids on
//! insert, the conditional `OPEN` → `MERGED` transition, and reviewer
//! changes that only apply while the pull request is still `OPEN`.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{DomainError, Error, PullRequest, PullRequestId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by pull request repository adapters.
    pub enum PullRequestPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "pull request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "pull request repository query failed: {message}",
        /// A pull request with the same id is already stored.
        Duplicate { pull_request_id: PullRequestId } =>
            "pull request {pull_request_id} already exists",
        /// The addressed pull request does not exist.
        NotFound { pull_request_id: PullRequestId } =>
            "pull request {pull_request_id} not found",
        /// The reviewer is not assigned to the pull request.
        ReviewerNotAssigned { pull_request_id: PullRequestId, user_id: UserId } =>
            "{user_id} is not a reviewer of {pull_request_id}",
        /// The pull request is merged, so its reviewers are frozen.
        Merged { pull_request_id: PullRequestId } =>
            "pull request {pull_request_id} is merged",
    }
}

impl From<PullRequestPersistenceError> for Error {
    fn from(value: PullRequestPersistenceError) -> Self {
        match value {
            PullRequestPersistenceError::Connection { message } => Self::unavailable(message),
            PullRequestPersistenceError::Query { message } => Self::query(message),
            PullRequestPersistenceError::Duplicate { .. } => {
                DomainError::pr_exists("PR id already exists").into()
            }
            PullRequestPersistenceError::NotFound { .. } => {
                DomainError::not_found("pull request not found").into()
            }
            PullRequestPersistenceError::ReviewerNotAssigned { .. } => {
                DomainError::not_assigned("reviewer is not assigned to this PR").into()
            }
            PullRequestPersistenceError::Merged { .. } => {
                DomainError::pr_merged("cannot reassign on merged PR").into()
            }
        }
    }
}

/// Store of pull requests and their reviewer sets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Insert a pull request together with its initial reviewers.
    ///
    /// Fails with `Duplicate` when the id is taken, even if a prior
    /// existence check passed.
    async fn create(&self, pull_request: &PullRequest) -> Result<(), PullRequestPersistenceError>;

    /// Fetch a pull request with its reviewer set populated.
    async fn find_by_id(
        &self,
        id: &PullRequestId,
    ) -> Result<Option<PullRequest>, PullRequestPersistenceError>;

    /// Fetch the pull requests whose ids are listed, newest first.
    ///
    /// Unknown ids are skipped. Ties on creation time order by id.
    async fn find_by_ids(
        &self,
        ids: &[PullRequestId],
    ) -> Result<Vec<PullRequest>, PullRequestPersistenceError>;

    /// Assign a reviewer. Re-adding an assigned reviewer is a no-op.
    ///
    /// Fails with `Merged` once the pull request is merged.
    async fn add_reviewer(
        &self,
        id: &PullRequestId,
        user_id: &UserId,
    ) -> Result<(), PullRequestPersistenceError>;

    /// Unassign a reviewer; fails with `ReviewerNotAssigned` when absent and
    /// with `Merged` once the pull request is merged.
    async fn remove_reviewer(
        &self,
        id: &PullRequestId,
        user_id: &UserId,
    ) -> Result<(), PullRequestPersistenceError>;

    /// Swap `old` for `new` atomically.
    ///
    /// Leaves the set untouched and fails with `Merged` when the pull request
    /// is no longer open, or with `ReviewerNotAssigned` when `old` is no
    /// longer assigned. Both checks share the write with the swap.
    async fn replace_reviewer(
        &self,
        id: &PullRequestId,
        old: &UserId,
        new: &UserId,
    ) -> Result<(), PullRequestPersistenceError>;

    /// Transition to `MERGED` only when currently `OPEN`.
    ///
    /// Returns `true` when this call performed the transition.
    async fn set_merged(
        &self,
        id: &PullRequestId,
        merged_at: DateTime<Utc>,
    ) -> Result<bool, PullRequestPersistenceError>;

    /// Reviewers of a pull request in identifier order.
    async fn list_reviewers(
        &self,
        id: &PullRequestId,
    ) -> Result<Vec<UserId>, PullRequestPersistenceError>;

    /// Ids of pull requests where `user_id` is currently a reviewer.
    async fn list_ids_by_reviewer(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PullRequestId>, PullRequestPersistenceError>;

    /// Whether a pull request with `id` exists.
    async fn exists(&self, id: &PullRequestId) -> Result<bool, PullRequestPersistenceError>;
}

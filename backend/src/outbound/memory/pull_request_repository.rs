//! In-memory implementation of [`PullRequestRepository`].

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{PullRequestPersistenceError, PullRequestRepository};
use crate::domain::{PullRequest, PullRequestId, UserId};

/// Pull request store keeping each aggregate with its reviewer set.
#[derive(Debug, Default)]
pub struct InMemoryPullRequestRepository {
    pull_requests: RwLock<BTreeMap<PullRequestId, PullRequest>>,
}

impl InMemoryPullRequestRepository {
    /// Create an empty pull request store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing(id: &PullRequestId) -> PullRequestPersistenceError {
    PullRequestPersistenceError::not_found(id.clone())
}

/// Borrow an open pull request for a reviewer change.
fn open_for_update<'a>(
    pull_requests: &'a mut BTreeMap<PullRequestId, PullRequest>,
    id: &PullRequestId,
) -> Result<&'a mut PullRequest, PullRequestPersistenceError> {
    let pull_request = pull_requests.get_mut(id).ok_or_else(|| missing(id))?;
    if pull_request.is_merged() {
        return Err(PullRequestPersistenceError::merged(id.clone()));
    }
    Ok(pull_request)
}

#[async_trait]
impl PullRequestRepository for InMemoryPullRequestRepository {
    async fn create(&self, pull_request: &PullRequest) -> Result<(), PullRequestPersistenceError> {
        let mut pull_requests = self.pull_requests.write().await;
        match pull_requests.entry(pull_request.id().clone()) {
            Entry::Occupied(_) => Err(PullRequestPersistenceError::duplicate(
                pull_request.id().clone(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(pull_request.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(
        &self,
        id: &PullRequestId,
    ) -> Result<Option<PullRequest>, PullRequestPersistenceError> {
        Ok(self.pull_requests.read().await.get(id).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &[PullRequestId],
    ) -> Result<Vec<PullRequest>, PullRequestPersistenceError> {
        let pull_requests = self.pull_requests.read().await;
        let mut found: Vec<PullRequest> = ids
            .iter()
            .filter_map(|id| pull_requests.get(id).cloned())
            .collect();
        found.sort_by(|a, b| {
            (Reverse(a.created_at()), a.id()).cmp(&(Reverse(b.created_at()), b.id()))
        });
        found.dedup_by(|a, b| a.id() == b.id());
        Ok(found)
    }

    async fn add_reviewer(
        &self,
        id: &PullRequestId,
        user_id: &UserId,
    ) -> Result<(), PullRequestPersistenceError> {
        let mut pull_requests = self.pull_requests.write().await;
        let pull_request = open_for_update(&mut pull_requests, id)?;
        pull_request.add_reviewer(user_id.clone());
        Ok(())
    }

    async fn remove_reviewer(
        &self,
        id: &PullRequestId,
        user_id: &UserId,
    ) -> Result<(), PullRequestPersistenceError> {
        let mut pull_requests = self.pull_requests.write().await;
        let pull_request = open_for_update(&mut pull_requests, id)?;
        if pull_request.remove_reviewer(user_id) {
            Ok(())
        } else {
            Err(PullRequestPersistenceError::reviewer_not_assigned(
                id.clone(),
                user_id.clone(),
            ))
        }
    }

    async fn replace_reviewer(
        &self,
        id: &PullRequestId,
        old: &UserId,
        new: &UserId,
    ) -> Result<(), PullRequestPersistenceError> {
        let mut pull_requests = self.pull_requests.write().await;
        let pull_request = open_for_update(&mut pull_requests, id)?;
        if !pull_request.remove_reviewer(old) {
            return Err(PullRequestPersistenceError::reviewer_not_assigned(
                id.clone(),
                old.clone(),
            ));
        }
        pull_request.add_reviewer(new.clone());
        Ok(())
    }

    async fn set_merged(
        &self,
        id: &PullRequestId,
        merged_at: DateTime<Utc>,
    ) -> Result<bool, PullRequestPersistenceError> {
        let mut pull_requests = self.pull_requests.write().await;
        let pull_request = pull_requests.get_mut(id).ok_or_else(|| missing(id))?;
        Ok(pull_request.mark_merged(merged_at))
    }

    async fn list_reviewers(
        &self,
        id: &PullRequestId,
    ) -> Result<Vec<UserId>, PullRequestPersistenceError> {
        let pull_requests = self.pull_requests.read().await;
        let pull_request = pull_requests.get(id).ok_or_else(|| missing(id))?;
        Ok(pull_request.reviewers().iter().cloned().collect())
    }

    async fn list_ids_by_reviewer(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PullRequestId>, PullRequestPersistenceError> {
        let pull_requests = self.pull_requests.read().await;
        Ok(pull_requests
            .values()
            .filter(|pull_request| pull_request.has_reviewer(user_id))
            .map(|pull_request| pull_request.id().clone())
            .collect())
    }

    async fn exists(&self, id: &PullRequestId) -> Result<bool, PullRequestPersistenceError> {
        Ok(self.pull_requests.read().await.contains_key(id))
    }
}

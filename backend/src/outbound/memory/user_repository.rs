//! In-memory implementation of [`UserRepository`].

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{TeamName, User, UserId, UserPatch};

/// User store keyed by id, so listings come back in id order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty user store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().await;
        match users.entry(user.id().clone()) {
            Entry::Occupied(_) => Err(UserPersistenceError::duplicate(user.id().clone())),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn list_by_team(&self, team_name: &TeamName) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|user| user.team_name() == team_name)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, UserPersistenceError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| UserPersistenceError::not_found(id.clone()))?;
        user.apply(patch);
        Ok(user.clone())
    }

    async fn set_active(&self, id: &UserId, is_active: bool) -> Result<User, UserPersistenceError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| UserPersistenceError::not_found(id.clone()))?;
        user.set_active(is_active);
        Ok(user.clone())
    }

    async fn list_active_in_team_excluding(
        &self,
        team_name: &TeamName,
        excluded: &[UserId],
    ) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|user| {
                user.is_active() && user.team_name() == team_name && !excluded.contains(user.id())
            })
            .cloned()
            .collect())
    }

    async fn exists(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.users.read().await.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    //! Behaviour of the in-memory user store.

    use rstest::{fixture, rstest};

    use super::*;

    fn uid(raw: &str) -> UserId {
        UserId::new(raw).expect("user id")
    }

    fn team(raw: &str) -> TeamName {
        TeamName::new(raw).expect("team")
    }

    fn user(id: &str, team_name: &str, is_active: bool) -> User {
        User::new(uid(id), id, team(team_name), is_active)
    }

    #[fixture]
    async fn seeded() -> InMemoryUserRepository {
        let repo = InMemoryUserRepository::new();
        for u in [
            user("c", "T", true),
            user("a", "T", true),
            user("b", "T", false),
            user("x", "other", true),
        ] {
            repo.create(&u).await.expect("seed user");
        }
        repo
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_duplicate_ids(#[future] seeded: InMemoryUserRepository) {
        let repo = seeded.await;
        let err = repo
            .create(&user("a", "elsewhere", true))
            .await
            .expect_err("duplicate");
        assert_eq!(err, UserPersistenceError::duplicate(uid("a")));
    }

    #[rstest]
    #[tokio::test]
    async fn list_by_team_is_ordered_by_id(#[future] seeded: InMemoryUserRepository) {
        let repo = seeded.await;
        let ids: Vec<_> = repo
            .list_by_team(&team("T"))
            .await
            .expect("list")
            .iter()
            .map(|u| u.id().as_str().to_owned())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[rstest]
    #[tokio::test]
    async fn active_listing_skips_inactive_and_excluded(#[future] seeded: InMemoryUserRepository) {
        let repo = seeded.await;
        let found = repo
            .list_active_in_team_excluding(&team("T"), &[uid("a")])
            .await
            .expect("list");
        let ids: Vec<_> = found.iter().map(|u| u.id().as_str()).collect();
        assert_eq!(ids, ["c"]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_only_present_fields(#[future] seeded: InMemoryUserRepository) {
        let repo = seeded.await;
        let updated = repo
            .update(&uid("a"), &UserPatch::new().with_team_name(team("other")))
            .await
            .expect("update");
        assert_eq!(updated.team_name(), &team("other"));
        assert_eq!(updated.username(), "a");
        assert!(updated.is_active());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_users_are_reported(#[future] seeded: InMemoryUserRepository) {
        let repo = seeded.await;
        let err = repo
            .set_active(&uid("ghost"), true)
            .await
            .expect_err("missing");
        assert_eq!(err, UserPersistenceError::not_found(uid("ghost")));
        assert!(!repo.exists(&uid("ghost")).await.expect("exists"));
    }

    #[rstest]
    #[tokio::test]
    async fn set_active_persists_the_flag(#[future] seeded: InMemoryUserRepository) {
        let repo = seeded.await;
        repo.set_active(&uid("b"), true).await.expect("toggle");
        let stored = repo
            .find_by_id(&uid("b"))
            .await
            .expect("find")
            .expect("present");
        assert!(stored.is_active());
    }
}

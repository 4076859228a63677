//! Random reviewer selection.
//!
//! Selection is a pure function of the candidate pool, the requested count
//! and a random source. The source is created per call so concurrent
//! requests never share generator state; tests inject a seeded one.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{User, UserId};

/// Pick up to `max` distinct reviewer ids from `candidates`.
///
/// Returns every candidate when the pool is no larger than `max`; otherwise a
/// uniform sample without replacement. Duplicate candidates count once.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use review_service::domain::{TeamName, User, UserId, select_reviewers};
///
/// let team = TeamName::new("core").expect("team");
/// let pool: Vec<User> = ["u1", "u2", "u3"]
///     .into_iter()
///     .map(|id| User::new(UserId::new(id).expect("id"), id, team.clone(), true))
///     .collect();
/// let mut rng = SmallRng::seed_from_u64(7);
/// let picked = select_reviewers(&pool, 2, &mut rng);
/// assert_eq!(picked.len(), 2);
/// assert_ne!(picked[0], picked[1]);
/// ```
pub fn select_reviewers<R>(candidates: &[User], max: usize, rng: &mut R) -> Vec<UserId>
where
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let pool: Vec<&UserId> = candidates
        .iter()
        .map(User::id)
        .filter(|id| seen.insert(*id))
        .collect();

    if pool.len() <= max {
        return pool.into_iter().cloned().collect();
    }

    pool.choose_multiple(rng, max)
        .map(|id| (*id).clone())
        .collect()
}

/// Strategy used by services to choose reviewers.
pub trait ReviewerSelector: Send + Sync {
    /// Choose up to `max` reviewers from `candidates`.
    fn select(&self, candidates: &[User], max: usize) -> Vec<UserId>;
}

/// Selector backed by a fresh entropy-seeded generator on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomReviewerSelector;

impl ReviewerSelector for RandomReviewerSelector {
    fn select(&self, candidates: &[User], max: usize) -> Vec<UserId> {
        let mut rng = SmallRng::from_entropy();
        select_reviewers(candidates, max, &mut rng)
    }
}

/// Deterministic selector: every call replays the same seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededReviewerSelector {
    seed: u64,
}

impl SeededReviewerSelector {
    /// Build a selector that always starts from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl ReviewerSelector for SeededReviewerSelector {
    fn select(&self, candidates: &[User], max: usize) -> Vec<UserId> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        select_reviewers(candidates, max, &mut rng)
    }
}

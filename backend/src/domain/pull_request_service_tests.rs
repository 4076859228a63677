//! Tests for the pull request lifecycle service.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockPullRequestRepository, MockUserRepository, PullRequestPersistenceError,
    UserPersistenceError,
};
use crate::domain::{DomainErrorCode, InfrastructureKind, TeamName};

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 2, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        fixture_timestamp().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        fixture_timestamp()
    }
}

/// Picks candidates in the order the store returned them.
struct InOrderSelector;

impl ReviewerSelector for InOrderSelector {
    fn select(&self, candidates: &[User], max: usize) -> Vec<UserId> {
        candidates
            .iter()
            .take(max)
            .map(|user| user.id().clone())
            .collect()
    }
}

fn uid(raw: &str) -> UserId {
    UserId::new(raw).expect("user id")
}

fn pr_id(raw: &str) -> PullRequestId {
    PullRequestId::new(raw).expect("pull request id")
}

fn member(raw: &str, is_active: bool) -> User {
    User::new(uid(raw), raw, TeamName::new("T").expect("team"), is_active)
}

fn open_pr(reviewers: &[&str]) -> PullRequest {
    PullRequest::open(PullRequestDraft {
        id: pr_id("pr-1"),
        name: "Add search".to_owned(),
        author_id: uid("A"),
        reviewers: reviewers.iter().map(|raw| uid(raw)).collect(),
        created_at: fixture_timestamp(),
    })
}

fn merged_pr(reviewers: &[&str]) -> PullRequest {
    let mut pr = open_pr(reviewers);
    pr.mark_merged(fixture_timestamp());
    pr
}

fn service(
    users: MockUserRepository,
    pull_requests: MockPullRequestRepository,
) -> PullRequestService<MockUserRepository, MockPullRequestRepository> {
    PullRequestService::new(Arc::new(users), Arc::new(pull_requests), Arc::new(FixtureClock))
        .with_selector(Arc::new(InOrderSelector))
}

fn create_request() -> CreatePullRequestRequest {
    CreatePullRequestRequest {
        pull_request_id: pr_id("pr-1"),
        pull_request_name: "Add search".to_owned(),
        author_id: uid("A"),
    }
}

#[fixture]
fn users() -> MockUserRepository {
    MockUserRepository::new()
}

#[fixture]
fn pull_requests() -> MockPullRequestRepository {
    MockPullRequestRepository::new()
}

#[rstest]
#[tokio::test]
async fn create_assigns_active_teammates_excluding_author(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests.expect_exists().return_once(|_| Ok(false));
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(member("A", true))));
    users
        .expect_list_active_in_team_excluding()
        .withf(|team, excluded| {
            team.as_str() == "T"
                && excluded.len() == 1
                && excluded.first().is_some_and(|id| id.as_str() == "A")
        })
        .return_once(|_, _| Ok(vec![member("B", true), member("C", true)]));
    pull_requests
        .expect_create()
        .withf(|pr| pr.reviewers().len() == 2 && !pr.has_reviewer(&uid("A")))
        .times(1)
        .return_once(|_| Ok(()));

    let pr = service(users, pull_requests)
        .create_pull_request(create_request())
        .await
        .expect("create succeeds");

    assert_eq!(pr.reviewers(), &BTreeSet::from([uid("B"), uid("C")]));
    assert_eq!(pr.created_at(), fixture_timestamp());
    assert!(!pr.is_merged());
}

#[rstest]
#[tokio::test]
async fn create_respects_configured_reviewer_count(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests.expect_exists().return_once(|_| Ok(false));
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(member("A", true))));
    users
        .expect_list_active_in_team_excluding()
        .return_once(|_, _| Ok(vec![member("B", true), member("C", true), member("D", true)]));
    pull_requests.expect_create().return_once(|_| Ok(()));

    let pr = service(users, pull_requests)
        .with_max_reviewers(1)
        .create_pull_request(create_request())
        .await
        .expect("create succeeds");

    assert_eq!(pr.reviewers().len(), 1);
}

#[rstest]
#[tokio::test]
async fn create_allows_an_empty_reviewer_set(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests.expect_exists().return_once(|_| Ok(false));
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(member("A", true))));
    users
        .expect_list_active_in_team_excluding()
        .return_once(|_, _| Ok(Vec::new()));
    pull_requests.expect_create().return_once(|_| Ok(()));

    let pr = service(users, pull_requests)
        .create_pull_request(create_request())
        .await
        .expect("create succeeds");

    assert!(pr.reviewers().is_empty());
}

#[rstest]
#[tokio::test]
async fn create_rejects_taken_ids(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests.expect_exists().return_once(|_| Ok(true));
    users.expect_find_by_id().times(0);
    pull_requests.expect_create().times(0);

    let err = service(users, pull_requests)
        .create_pull_request(create_request())
        .await
        .expect_err("duplicate id");

    assert_eq!(err.code(), Some(DomainErrorCode::PrExists));
}

#[rstest]
#[tokio::test]
async fn create_maps_insert_conflicts_to_pr_exists(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests.expect_exists().return_once(|_| Ok(false));
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(member("A", true))));
    users
        .expect_list_active_in_team_excluding()
        .return_once(|_, _| Ok(vec![member("B", true)]));
    pull_requests
        .expect_create()
        .return_once(|_| Err(PullRequestPersistenceError::duplicate(pr_id("pr-1"))));

    let err = service(users, pull_requests)
        .create_pull_request(create_request())
        .await
        .expect_err("insert race");

    assert_eq!(err.code(), Some(DomainErrorCode::PrExists));
}

#[rstest]
#[tokio::test]
async fn create_requires_a_known_author(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests.expect_exists().return_once(|_| Ok(false));
    users.expect_find_by_id().return_once(|_| Ok(None));
    pull_requests.expect_create().times(0);

    let err = service(users, pull_requests)
        .create_pull_request(create_request())
        .await
        .expect_err("unknown author");

    assert_eq!(err.code(), Some(DomainErrorCode::NotFound));
}

#[rstest]
#[tokio::test]
async fn create_wraps_store_outages(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests.expect_exists().return_once(|_| Ok(false));
    users
        .expect_find_by_id()
        .return_once(|_| Err(UserPersistenceError::connection("refused")));

    let err = service(users, pull_requests)
        .create_pull_request(create_request())
        .await
        .expect_err("outage");

    match err {
        Error::Infrastructure { kind, message } => {
            assert_eq!(kind, InfrastructureKind::Unavailable);
            assert_eq!(message, "load user: refused");
        }
        other @ Error::Domain(_) => panic!("expected infrastructure error, got {other}"),
    }
}

#[rstest]
#[tokio::test]
async fn merge_sets_status_and_timestamp(
    users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    let mut seq = mockall::Sequence::new();
    pull_requests
        .expect_find_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(Some(open_pr(&["B"]))));
    pull_requests
        .expect_set_merged()
        .withf(|_, at| *at == fixture_timestamp())
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(true));
    pull_requests
        .expect_find_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(Some(merged_pr(&["B"]))));

    let pr = service(users, pull_requests)
        .merge_pull_request(&pr_id("pr-1"))
        .await
        .expect("merge succeeds");

    assert!(pr.is_merged());
    assert_eq!(pr.merged_at(), Some(fixture_timestamp()));
    assert!(pr.has_reviewer(&uid("B")));
}

#[rstest]
#[tokio::test]
async fn merge_is_idempotent(users: MockUserRepository, mut pull_requests: MockPullRequestRepository) {
    let stored = merged_pr(&["B"]);
    let expected = stored.clone();
    pull_requests
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    pull_requests.expect_set_merged().times(0);

    let pr = service(users, pull_requests)
        .merge_pull_request(&pr_id("pr-1"))
        .await
        .expect("repeat merge succeeds");

    assert_eq!(pr, expected);
}

#[rstest]
#[tokio::test]
async fn merge_of_unknown_pull_request_is_not_found(
    users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests.expect_find_by_id().return_once(|_| Ok(None));

    let err = service(users, pull_requests)
        .merge_pull_request(&pr_id("missing"))
        .await
        .expect_err("unknown pr");

    assert_eq!(err.code(), Some(DomainErrorCode::NotFound));
}

#[rstest]
#[tokio::test]
async fn reassign_replaces_with_unassigned_teammate(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    let mut seq = mockall::Sequence::new();
    pull_requests
        .expect_find_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(Some(open_pr(&["B", "C"]))));
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(member("B", true))));
    users
        .expect_list_active_in_team_excluding()
        .withf(|_, excluded| {
            let excluded: BTreeSet<_> = excluded.iter().cloned().collect();
            excluded == BTreeSet::from([uid("A"), uid("B"), uid("C")])
        })
        .return_once(|_, _| Ok(vec![member("E", true)]));
    pull_requests
        .expect_replace_reviewer()
        .withf(|_, old, new| old.as_str() == "B" && new.as_str() == "E")
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _, _| Ok(()));
    pull_requests
        .expect_find_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(Some(open_pr(&["C", "E"]))));

    let outcome = service(users, pull_requests)
        .reassign_reviewer(&pr_id("pr-1"), &uid("B"))
        .await
        .expect("reassign succeeds");

    assert_eq!(outcome.replaced_by, uid("E"));
    assert!(!outcome.pull_request.has_reviewer(&uid("B")));
    assert!(outcome.pull_request.has_reviewer(&uid("E")));
}

#[rstest]
#[case::assigned_reviewer("B")]
#[case::unassigned_reviewer("D")]
#[tokio::test]
async fn reassign_on_merged_pull_request_is_rejected(
    users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
    #[case] old_reviewer: &str,
) {
    pull_requests
        .expect_find_by_id()
        .return_once(|_| Ok(Some(merged_pr(&["B"]))));
    pull_requests.expect_replace_reviewer().times(0);

    let err = service(users, pull_requests)
        .reassign_reviewer(&pr_id("pr-1"), &uid(old_reviewer))
        .await
        .expect_err("merged");

    assert_eq!(err.code(), Some(DomainErrorCode::PrMerged));
}

#[rstest]
#[tokio::test]
async fn reassign_requires_an_assigned_reviewer(
    users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests
        .expect_find_by_id()
        .return_once(|_| Ok(Some(open_pr(&["B"]))));

    let err = service(users, pull_requests)
        .reassign_reviewer(&pr_id("pr-1"), &uid("D"))
        .await
        .expect_err("not assigned");

    assert_eq!(err.code(), Some(DomainErrorCode::NotAssigned));
}

#[rstest]
#[tokio::test]
async fn reassign_without_candidates_fails(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests
        .expect_find_by_id()
        .return_once(|_| Ok(Some(open_pr(&["B", "C"]))));
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(member("B", true))));
    users
        .expect_list_active_in_team_excluding()
        .return_once(|_, _| Ok(Vec::new()));
    pull_requests.expect_replace_reviewer().times(0);

    let err = service(users, pull_requests)
        .reassign_reviewer(&pr_id("pr-1"), &uid("B"))
        .await
        .expect_err("no candidate");

    assert_eq!(err.code(), Some(DomainErrorCode::NoCandidate));
}

#[rstest]
#[tokio::test]
async fn reassign_reports_concurrent_removal(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests
        .expect_find_by_id()
        .return_once(|_| Ok(Some(open_pr(&["B"]))));
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(member("B", true))));
    users
        .expect_list_active_in_team_excluding()
        .return_once(|_, _| Ok(vec![member("C", true)]));
    pull_requests.expect_replace_reviewer().return_once(|_, _, _| {
        Err(PullRequestPersistenceError::reviewer_not_assigned(
            pr_id("pr-1"),
            uid("B"),
        ))
    });

    let err = service(users, pull_requests)
        .reassign_reviewer(&pr_id("pr-1"), &uid("B"))
        .await
        .expect_err("raced");

    assert_eq!(err.code(), Some(DomainErrorCode::NotAssigned));
}

#[rstest]
#[tokio::test]
async fn reassign_reports_a_merge_that_lands_first(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests
        .expect_find_by_id()
        .return_once(|_| Ok(Some(open_pr(&["B"]))));
    users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(member("B", true))));
    users
        .expect_list_active_in_team_excluding()
        .return_once(|_, _| Ok(vec![member("C", true)]));
    pull_requests
        .expect_replace_reviewer()
        .return_once(|_, _, _| Err(PullRequestPersistenceError::merged(pr_id("pr-1"))));

    let err = service(users, pull_requests)
        .reassign_reviewer(&pr_id("pr-1"), &uid("B"))
        .await
        .expect_err("merged concurrently");

    assert_eq!(err.code(), Some(DomainErrorCode::PrMerged));
}

#[rstest]
#[tokio::test]
async fn reassign_requires_the_old_reviewer_record(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    pull_requests
        .expect_find_by_id()
        .return_once(|_| Ok(Some(open_pr(&["B"]))));
    users.expect_find_by_id().return_once(|_| Ok(None));

    let err = service(users, pull_requests)
        .reassign_reviewer(&pr_id("pr-1"), &uid("B"))
        .await
        .expect_err("vanished reviewer");

    assert_eq!(err.code(), Some(DomainErrorCode::NotFound));
}

#[rstest]
#[tokio::test]
async fn user_reviews_lists_assigned_pull_requests(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    users.expect_exists().return_once(|_| Ok(true));
    pull_requests
        .expect_list_ids_by_reviewer()
        .return_once(|_| Ok(vec![pr_id("pr-1")]));
    pull_requests
        .expect_find_by_ids()
        .withf(|ids| ids.len() == 1 && ids.first().is_some_and(|id| id.as_str() == "pr-1"))
        .return_once(|_| Ok(vec![open_pr(&["B"])]));

    let reviews = service(users, pull_requests)
        .user_reviews(&uid("B"))
        .await
        .expect("reviews");

    assert_eq!(reviews.len(), 1);
}

#[rstest]
#[tokio::test]
async fn user_reviews_may_be_empty(
    mut users: MockUserRepository,
    mut pull_requests: MockPullRequestRepository,
) {
    users.expect_exists().return_once(|_| Ok(true));
    pull_requests
        .expect_list_ids_by_reviewer()
        .return_once(|_| Ok(Vec::new()));
    pull_requests.expect_find_by_ids().times(0);

    let reviews = service(users, pull_requests)
        .user_reviews(&uid("Z"))
        .await
        .expect("reviews");

    assert!(reviews.is_empty());
}

#[rstest]
#[tokio::test]
async fn user_reviews_for_unknown_user_is_not_found(
    mut users: MockUserRepository,
    pull_requests: MockPullRequestRepository,
) {
    users.expect_exists().return_once(|_| Ok(false));

    let err = service(users, pull_requests)
        .user_reviews(&uid("ghost"))
        .await
        .expect_err("unknown user");

    assert_eq!(err.code(), Some(DomainErrorCode::NotFound));
}

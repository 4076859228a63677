//! Pull request HTTP handlers.
//!
//! ```text
//! POST /pullRequest/create {"pull_request_id":"pr-1","pull_request_name":"Add search","author_id":"u1"}
//! POST /pullRequest/merge {"pull_request_id":"pr-1"}
//! POST /pullRequest/reassign {"pull_request_id":"pr-1","old_reviewer_id":"u2"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreatePullRequestRequest;
use crate::domain::{PullRequestId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ApiError, ErrorEnvelope};
use crate::inbound::http::schemas::{PullRequestBody, PullRequestEnvelope};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /pullRequest/create`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePullRequestBody {
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
    #[schema(example = "Add search")]
    pub pull_request_name: String,
    #[schema(example = "u1")]
    pub author_id: String,
}

impl TryFrom<CreatePullRequestBody> for CreatePullRequestRequest {
    type Error = ApiError;

    fn try_from(value: CreatePullRequestBody) -> Result<Self, Self::Error> {
        if value.pull_request_name.trim().is_empty() {
            return Err(ApiError::invalid_request(
                "pull_request_name must not be empty",
            ));
        }
        Ok(Self {
            pull_request_id: PullRequestId::new(value.pull_request_id)?,
            pull_request_name: value.pull_request_name,
            author_id: UserId::new(value.author_id)?,
        })
    }
}

/// Request body for `POST /pullRequest/merge`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MergePullRequestBody {
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
}

/// Request body for `POST /pullRequest/reassign`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReassignReviewerBody {
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
    #[schema(example = "u2")]
    pub old_reviewer_id: String,
}

/// Response body for `POST /pullRequest/reassign`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReassignReviewerResponse {
    pub pr: PullRequestBody,
    /// Reviewer who replaced `old_reviewer_id`.
    pub replaced_by: String,
}

/// Open a pull request and assign reviewers from the author's team.
#[utoipa::path(
    post,
    path = "/pullRequest/create",
    request_body = CreatePullRequestBody,
    responses(
        (status = 201, description = "Pull request created", body = PullRequestEnvelope),
        (status = 400, description = "Invalid request or duplicate id", body = ErrorEnvelope),
        (status = 404, description = "Author not found", body = ErrorEnvelope)
    ),
    tags = ["pull-requests"],
    operation_id = "createPullRequest"
)]
#[post("/pullRequest/create")]
pub async fn create_pull_request(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePullRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = CreatePullRequestRequest::try_from(payload.into_inner())?;
    let pull_request = state.pull_requests.create_pull_request(request).await?;
    Ok(HttpResponse::Created().json(PullRequestEnvelope::from(pull_request)))
}

/// Merge a pull request; merging twice is not an error.
#[utoipa::path(
    post,
    path = "/pullRequest/merge",
    request_body = MergePullRequestBody,
    responses(
        (status = 200, description = "Merged pull request", body = PullRequestEnvelope),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 404, description = "Pull request not found", body = ErrorEnvelope)
    ),
    tags = ["pull-requests"],
    operation_id = "mergePullRequest"
)]
#[post("/pullRequest/merge")]
pub async fn merge_pull_request(
    state: web::Data<HttpState>,
    payload: web::Json<MergePullRequestBody>,
) -> ApiResult<web::Json<PullRequestEnvelope>> {
    let id = PullRequestId::new(payload.into_inner().pull_request_id)?;
    let pull_request = state.pull_requests.merge_pull_request(&id).await?;
    Ok(web::Json(pull_request.into()))
}

/// Replace a reviewer with another active member of their team.
#[utoipa::path(
    post,
    path = "/pullRequest/reassign",
    request_body = ReassignReviewerBody,
    responses(
        (status = 200, description = "Reviewer replaced", body = ReassignReviewerResponse),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 404, description = "Pull request or user not found", body = ErrorEnvelope),
        (status = 409, description = "Merged, not assigned or no candidate", body = ErrorEnvelope)
    ),
    tags = ["pull-requests"],
    operation_id = "reassignReviewer"
)]
#[post("/pullRequest/reassign")]
pub async fn reassign_reviewer(
    state: web::Data<HttpState>,
    payload: web::Json<ReassignReviewerBody>,
) -> ApiResult<web::Json<ReassignReviewerResponse>> {
    let ReassignReviewerBody {
        pull_request_id,
        old_reviewer_id,
    } = payload.into_inner();
    let id = PullRequestId::new(pull_request_id)?;
    let old_reviewer = UserId::new(old_reviewer_id)?;

    let outcome = state
        .pull_requests
        .reassign_reviewer(&id, &old_reviewer)
        .await?;
    Ok(web::Json(ReassignReviewerResponse {
        pr: outcome.pull_request.into(),
        replaced_by: outcome.replaced_by.into(),
    }))
}

#[cfg(test)]
#[path = "pull_requests_tests.rs"]
mod tests;

//! User HTTP handlers.
//!
//! ```text
//! POST /users/setIsActive {"user_id":"u1","is_active":false}
//! GET /users/getReview?user_id=u1
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ApiError, ErrorEnvelope};
use crate::inbound::http::schemas::{PullRequestBody, UserBody};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /users/setIsActive`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetIsActiveRequest {
    #[schema(example = "u1")]
    pub user_id: String,
    pub is_active: bool,
}

/// `{"user": ...}` wrapper returned after toggling activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: UserBody,
}

/// Query parameters for `GET /users/getReview`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    /// Reviewer whose assignments are listed.
    pub user_id: Option<String>,
}

/// Pull requests a user currently reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserReviewsResponse {
    pub user_id: String,
    /// Newest first.
    pub pull_requests: Vec<PullRequestBody>,
}

/// Enable or disable a user as a reviewer.
#[utoipa::path(
    post,
    path = "/users/setIsActive",
    request_body = SetIsActiveRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "setUserIsActive"
)]
#[post("/users/setIsActive")]
pub async fn set_is_active(
    state: web::Data<HttpState>,
    payload: web::Json<SetIsActiveRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let SetIsActiveRequest { user_id, is_active } = payload.into_inner();
    let user_id = UserId::new(user_id)?;
    let user = state.users.set_is_active(&user_id, is_active).await?;
    Ok(web::Json(UserResponse { user: user.into() }))
}

/// List the pull requests a user reviews.
#[utoipa::path(
    get,
    path = "/users/getReview",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Assigned pull requests", body = UserReviewsResponse),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUserReviews"
)]
#[get("/users/getReview")]
pub async fn get_reviews(
    state: web::Data<HttpState>,
    query: web::Query<UserIdQuery>,
) -> ApiResult<web::Json<UserReviewsResponse>> {
    let raw = query
        .into_inner()
        .user_id
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::invalid_request("user_id query parameter is required"))?;
    let user_id = UserId::new(raw)?;
    let reviews = state.pull_requests.user_reviews(&user_id).await?;
    Ok(web::Json(UserReviewsResponse {
        user_id: user_id.into(),
        pull_requests: reviews.into_iter().map(PullRequestBody::from).collect(),
    }))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;

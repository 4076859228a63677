//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every review endpoint and the wire schemas from
//! [`crate::inbound::http`]. Domain types stay free of utoipa derives; the
//! HTTP layer mirrors them. Served by Swagger UI in debug builds and printed
//! by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::error::{ErrorBody, ErrorEnvelope};
use crate::inbound::http::pull_requests::{
    CreatePullRequestBody, MergePullRequestBody, ReassignReviewerBody, ReassignReviewerResponse,
};
use crate::inbound::http::schemas::{
    PullRequestBody, PullRequestEnvelope, TeamBody, TeamMemberBody, UserBody,
};
use crate::inbound::http::teams::CreateTeamResponse;
use crate::inbound::http::users::{SetIsActiveRequest, UserResponse, UserReviewsResponse};

/// OpenAPI document for the review API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Review assignment API",
        description = "Teams, users and pull requests with automatic reviewer assignment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::teams::create_team,
        crate::inbound::http::teams::get_team,
        crate::inbound::http::users::set_is_active,
        crate::inbound::http::users::get_reviews,
        crate::inbound::http::pull_requests::create_pull_request,
        crate::inbound::http::pull_requests::merge_pull_request,
        crate::inbound::http::pull_requests::reassign_reviewer,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TeamBody,
        TeamMemberBody,
        CreateTeamResponse,
        UserBody,
        SetIsActiveRequest,
        UserResponse,
        UserReviewsResponse,
        PullRequestBody,
        PullRequestEnvelope,
        CreatePullRequestBody,
        MergePullRequestBody,
        ReassignReviewerBody,
        ReassignReviewerResponse,
        ErrorBody,
        ErrorEnvelope,
    )),
    tags(
        (name = "teams", description = "Team rosters"),
        (name = "users", description = "Reviewer activity and assignments"),
        (name = "pull-requests", description = "Pull request lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

//! HTTP adapter mapping for service errors.
//!
//! Purpose: keep [`crate::domain::Error`] transport agnostic while giving
//! handlers one response shape: `{"error": {"code": ..., "message": ...}}`.
//! Infrastructure failures are logged in full and redacted for clients.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{
    DomainError, DomainErrorCode, Error, IdentifierValidationError, InfrastructureKind, TraceId,
};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Code used for malformed bodies, missing parameters and invalid identifiers.
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
/// Code used for redacted infrastructure failures.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
/// Code used when a store call outlived its deadline.
pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";

/// Error code and message returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Human readable message.
    #[schema(example = "pull request not found")]
    pub message: String,
}

/// JSON envelope wrapping every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Error rendered by HTTP handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {}", .body.code, .body.message)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

fn status_for(code: DomainErrorCode) -> StatusCode {
    match code {
        DomainErrorCode::NotFound => StatusCode::NOT_FOUND,
        DomainErrorCode::TeamExists | DomainErrorCode::PrExists => StatusCode::BAD_REQUEST,
        DomainErrorCode::PrMerged | DomainErrorCode::NotAssigned | DomainErrorCode::NoCandidate => {
            StatusCode::CONFLICT
        }
    }
}

impl ApiError {
    fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// Rejected request shape or parameter.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_REQUEST, message)
    }

    /// Redacted server-side failure.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR,
            "internal error",
        )
    }

    /// Redacted store deadline expiry.
    pub fn unavailable() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            SERVICE_UNAVAILABLE,
            "service unavailable",
        )
    }

    /// Stable error code sent to the client.
    pub fn code(&self) -> &str {
        self.body.code.as_str()
    }

    /// Message sent to the client.
    pub fn message(&self) -> &str {
        self.body.message.as_str()
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self::new(status_for(value.code()), value.code().as_str(), value.message())
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        match value {
            Error::Domain(domain) => domain.into(),
            Error::Infrastructure { kind, message } => {
                let trace_id = TraceId::current().map(|id| id.to_string());
                error!(
                    %kind,
                    error = %message,
                    trace_id = trace_id.as_deref().unwrap_or_default(),
                    "request failed on infrastructure"
                );
                match kind {
                    InfrastructureKind::DeadlineExceeded => Self::unavailable(),
                    InfrastructureKind::Unavailable | InfrastructureKind::Query => {
                        Self::internal()
                    }
                }
            }
        }
    }
}

impl From<IdentifierValidationError> for ApiError {
    fn from(value: IdentifierValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ErrorEnvelope {
            error: self.body.clone(),
        })
    }
}

/// JSON extractor settings rejecting malformed bodies with the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        warn!(error = %err, "rejected request body");
        ApiError::invalid_request("invalid request body").into()
    })
}

/// Query extractor settings rejecting malformed query strings.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        warn!(error = %err, "rejected query string");
        ApiError::invalid_request("invalid query string").into()
    })
}

//! Domain-level error types.
//!
//! Failures come in two tiers. [`DomainError`] covers expected business-rule
//! violations and always carries a stable [`DomainErrorCode`]. Infrastructure
//! failures (stores unreachable, failing queries, expired deadlines) are
//! wrapped with context in [`Error::Infrastructure`]. Callers tell the tiers
//! apart by matching on [`Error`], never by inspecting messages.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine-readable code describing a business-rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainErrorCode {
    /// A team with the same name already exists.
    TeamExists,
    /// A pull request with the same id already exists.
    PrExists,
    /// The pull request is merged and can no longer change reviewers.
    PrMerged,
    /// The user is not a reviewer of the pull request.
    NotAssigned,
    /// No active team member can take over the review.
    NoCandidate,
    /// The referenced entity does not exist.
    NotFound,
}

impl DomainErrorCode {
    /// Wire representation, e.g. `PR_MERGED`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TeamExists => "TEAM_EXISTS",
            Self::PrExists => "PR_EXISTS",
            Self::PrMerged => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoCandidate => "NO_CANDIDATE",
            Self::NotFound => "NOT_FOUND",
        }
    }
}

impl fmt::Display for DomainErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business-rule violation with a stable code and a human readable message.
///
/// # Examples
/// ```
/// use review_service::domain::{DomainError, DomainErrorCode};
///
/// let err = DomainError::not_found("user u1 not found");
/// assert_eq!(err.code(), DomainErrorCode::NotFound);
/// assert_eq!(err.to_string(), "user u1 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct DomainError {
    code: DomainErrorCode,
    message: String,
}

impl DomainError {
    /// Create an error with an explicit code.
    pub fn new(code: DomainErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> DomainErrorCode {
        self.code
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`DomainErrorCode::TeamExists`].
    pub fn team_exists(message: impl Into<String>) -> Self {
        Self::new(DomainErrorCode::TeamExists, message)
    }

    /// Convenience constructor for [`DomainErrorCode::PrExists`].
    pub fn pr_exists(message: impl Into<String>) -> Self {
        Self::new(DomainErrorCode::PrExists, message)
    }

    /// Convenience constructor for [`DomainErrorCode::PrMerged`].
    pub fn pr_merged(message: impl Into<String>) -> Self {
        Self::new(DomainErrorCode::PrMerged, message)
    }

    /// Convenience constructor for [`DomainErrorCode::NotAssigned`].
    pub fn not_assigned(message: impl Into<String>) -> Self {
        Self::new(DomainErrorCode::NotAssigned, message)
    }

    /// Convenience constructor for [`DomainErrorCode::NoCandidate`].
    pub fn no_candidate(message: impl Into<String>) -> Self {
        Self::new(DomainErrorCode::NoCandidate, message)
    }

    /// Convenience constructor for [`DomainErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(DomainErrorCode::NotFound, message)
    }
}

/// Category of an infrastructure failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfrastructureKind {
    /// A store could not be reached.
    Unavailable,
    /// A store accepted the call but failed to execute it.
    Query,
    /// A store call did not finish within its deadline.
    DeadlineExceeded,
}

impl fmt::Display for InfrastructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unavailable => "store unavailable",
            Self::Query => "store query failed",
            Self::DeadlineExceeded => "store deadline exceeded",
        };
        f.write_str(label)
    }
}

/// Error returned by every service operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Expected business-rule violation, returned unwrapped.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Opaque infrastructure failure with context.
    #[error("{kind}: {message}")]
    Infrastructure {
        /// Failure category.
        kind: InfrastructureKind,
        /// Context describing what failed.
        message: String,
    },
}

impl Error {
    /// Infrastructure failure for an unreachable store.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Infrastructure {
            kind: InfrastructureKind::Unavailable,
            message: message.into(),
        }
    }

    /// Infrastructure failure for a failing store call.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Infrastructure {
            kind: InfrastructureKind::Query,
            message: message.into(),
        }
    }

    /// Infrastructure failure for a store call that outlived its deadline.
    pub fn deadline_exceeded(operation: &str, limit: Duration) -> Self {
        Self::Infrastructure {
            kind: InfrastructureKind::DeadlineExceeded,
            message: format!("{operation} did not complete within {}ms", limit.as_millis()),
        }
    }

    /// The domain error, when this is a business-rule violation.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(error) => Some(error),
            Self::Infrastructure { .. } => None,
        }
    }

    /// Stable code for domain errors; `None` for infrastructure failures.
    pub fn code(&self) -> Option<DomainErrorCode> {
        self.as_domain().map(DomainError::code)
    }

    /// Prefix infrastructure messages with the operation that failed.
    ///
    /// Domain errors pass through unchanged.
    #[must_use]
    pub fn context(self, context: &str) -> Self {
        match self {
            Self::Infrastructure { kind, message } => Self::Infrastructure {
                kind,
                message: format!("{context}: {message}"),
            },
            domain @ Self::Domain(_) => domain,
        }
    }
}

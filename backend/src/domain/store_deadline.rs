//! Per-call deadline applied to store operations.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::Error;

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Bounds every store call made by a service.
///
/// Expiry drops the in-flight future, cancelling the store call, and
/// surfaces as [`Error::Infrastructure`] with a deadline kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreDeadline {
    limit: Duration,
}

impl Default for StoreDeadline {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_TIMEOUT)
    }
}

impl StoreDeadline {
    /// Create a deadline of `limit` per call.
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    /// Configured limit.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Await `future` within the deadline and convert its error.
    ///
    /// Infrastructure errors gain `operation` as context.
    pub async fn call<T, E, F>(&self, operation: &'static str, future: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<Error>,
    {
        match tokio::time::timeout(self.limit, future).await {
            Ok(result) => result.map_err(|err| err.into().context(operation)),
            Err(_) => {
                warn!(
                    operation,
                    limit_ms = u64::try_from(self.limit.as_millis()).unwrap_or(u64::MAX),
                    "store call exceeded deadline"
                );
                Err(Error::deadline_exceeded(operation, self.limit))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Deadline enforcement for store calls.

    use rstest::rstest;

    use super::*;
    use crate::domain::{DomainError, DomainErrorCode, InfrastructureKind};

    #[tokio::test]
    async fn completed_calls_pass_through() {
        let deadline = StoreDeadline::default();
        let value = deadline
            .call("load", async { Ok::<_, Error>(7) })
            .await
            .expect("value");
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn slow_calls_become_infrastructure_errors() {
        let deadline = StoreDeadline::new(Duration::from_millis(10));
        let err = deadline
            .call("load user", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, Error>(())
            })
            .await
            .expect_err("deadline should expire");
        assert!(matches!(
            err,
            Error::Infrastructure {
                kind: InfrastructureKind::DeadlineExceeded,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn domain_errors_are_not_wrapped() {
        let deadline = StoreDeadline::default();
        let err = deadline
            .call("merge", async {
                Err::<(), _>(Error::from(DomainError::not_found("pull request not found")))
            })
            .await
            .expect_err("domain error");
        assert_eq!(err.code(), Some(DomainErrorCode::NotFound));
        assert_eq!(err.to_string(), "pull request not found");
    }

    #[rstest]
    fn default_limit_is_five_seconds() {
        assert_eq!(StoreDeadline::default().limit(), Duration::from_secs(5));
    }
}

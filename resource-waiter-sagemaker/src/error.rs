//! Errors returned by `wait_until`.

use crate::types::{DescribeError, ResourceDescription};
use crate::waiters::SageMakerWaiter;
use resource_waiter_core::{ConfigError, ObservedResponses, WaiterError};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SageMakerWaiterError {
    #[error("{waiter}: '{name}' reached status {status}{}", reason_suffix(.failure_reason.as_deref()))]
    FailureState {
        waiter: SageMakerWaiter,
        name: String,
        status: String,
        failure_reason: Option<String>,
        observed: ObservedResponses,
    },

    #[error("{waiter}: describe for '{name}' failed with a non-retryable error: {error}")]
    NonRetryable {
        waiter: SageMakerWaiter,
        name: String,
        error: DescribeError,
    },

    #[error("{waiter}: timed out after {elapsed:?} waiting for '{name}'; observed: {observed}")]
    Timeout {
        waiter: SageMakerWaiter,
        name: String,
        elapsed: Duration,
        last: Option<ResourceDescription>,
        observed: ObservedResponses,
    },

    #[error("{waiter}: wait for '{name}' was aborted")]
    Aborted {
        waiter: SageMakerWaiter,
        name: String,
    },

    #[error("{waiter}: unexpected error while describing '{name}': {error}")]
    Unexpected {
        waiter: SageMakerWaiter,
        name: String,
        error: DescribeError,
    },

    #[error("invalid waiter configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

fn reason_suffix(failure_reason: Option<&str>) -> String {
    failure_reason.map_or_else(String::new, |r| format!(" ({r})"))
}

pub type SageMakerWaiterResult<T> = Result<T, SageMakerWaiterError>;

impl SageMakerWaiterError {
    pub(crate) fn from_waiter_error(
        waiter: SageMakerWaiter,
        name: &str,
        err: WaiterError<ResourceDescription, DescribeError>,
    ) -> Self {
        let name = name.to_string();
        match err {
            WaiterError::FailureState {
                response, observed, ..
            } => Self::FailureState {
                waiter,
                name,
                status: response.status.unwrap_or_else(|| "<none>".to_string()),
                failure_reason: response.failure_reason,
                observed,
            },
            WaiterError::NonRetryable { error, .. } => Self::NonRetryable {
                waiter,
                name,
                error,
            },
            WaiterError::Timeout {
                elapsed,
                last,
                observed,
                ..
            } => Self::Timeout {
                waiter,
                name,
                elapsed,
                last: last.and_then(|reason| reason.into_response()),
                observed,
            },
            WaiterError::Aborted { .. } => Self::Aborted { waiter, name },
            WaiterError::Unexpected { error, .. } => Self::Unexpected {
                waiter,
                name,
                error,
            },
            WaiterError::InvalidConfiguration(e) => Self::InvalidConfiguration(e),
        }
    }

    /// Failure state or non-retryable error: retrying the same wait will not help.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::FailureState { .. } | Self::NonRetryable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceKind;

    #[test]
    fn test_failure_state_message_includes_reason() {
        let response = ResourceDescription::new(
            ResourceKind::Endpoint,
            "my-endpoint",
            Some("Failed".to_string()),
        )
        .with_failure_reason(Some("Image not found".to_string()));
        let err = SageMakerWaiterError::from_waiter_error(
            SageMakerWaiter::EndpointInService,
            "my-endpoint",
            WaiterError::FailureState {
                response,
                attempts: 1,
                observed: ObservedResponses::new(),
            },
        );
        assert!(err.is_terminal_failure());
        assert_eq!(
            err.to_string(),
            "endpoint-in-service: 'my-endpoint' reached status Failed (Image not found)"
        );
    }

    #[test]
    fn test_timeout_keeps_last_response_only() {
        let err = SageMakerWaiterError::from_waiter_error(
            SageMakerWaiter::TrainingJobCompletedOrStopped,
            "job",
            WaiterError::Timeout {
                elapsed: Duration::from_secs(600),
                attempts: 5,
                last: Some(resource_waiter_core::Reason::Error(DescribeError::transport("boom"))),
                observed: ObservedResponses::new(),
            },
        );
        match err {
            SageMakerWaiterError::Timeout { last, elapsed, .. } => {
                assert!(last.is_none());
                assert_eq!(elapsed, Duration::from_secs(600));
            }
            other => panic!("Expected Timeout, got {other:?}"),
        }
    }
}

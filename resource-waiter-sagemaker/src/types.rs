//! Shared types for SageMaker waiters.

use crate::waiters::SageMakerWaiter;
use resource_waiter_core::{CancellationToken, WaiterOptions};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// SageMaker resource families that have a describe operation with a status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    Endpoint,
    NotebookInstance,
    TrainingJob,
    ProcessingJob,
    TransformJob,
}

impl ResourceKind {
    /// Name of the status member in the describe response.
    pub fn status_field(self) -> &'static str {
        match self {
            Self::Endpoint => "EndpointStatus",
            Self::NotebookInstance => "NotebookInstanceStatus",
            Self::TrainingJob => "TrainingJobStatus",
            Self::ProcessingJob => "ProcessingJobStatus",
            Self::TransformJob => "TransformJobStatus",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Endpoint => "endpoint",
            Self::NotebookInstance => "notebook instance",
            Self::TrainingJob => "training job",
            Self::ProcessingJob => "processing job",
            Self::TransformJob => "transform job",
        };
        f.write_str(name)
    }
}

/// The parts of a describe response the waiters look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDescription {
    pub kind: ResourceKind,
    pub name: String,
    /// Status string as returned by the service, e.g. `InService`.
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl ResourceDescription {
    pub fn new(kind: ResourceKind, name: impl Into<String>, status: Option<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            status,
            failure_reason: None,
        }
    }

    #[must_use]
    pub fn with_failure_reason(mut self, failure_reason: Option<String>) -> Self {
        self.failure_reason = failure_reason;
        self
    }

    pub fn status_is(&self, expected: &str) -> bool {
        self.status.as_deref() == Some(expected)
    }

    /// `EndpointStatus=Creating` style text used in observation tallies.
    pub fn summary(&self) -> String {
        format!(
            "{}={}",
            self.kind.status_field(),
            self.status.as_deref().unwrap_or("<none>")
        )
    }
}

/// A failed describe call, reduced to the service error code and message.
///
/// `code` is `None` when the request never produced a service error
/// (timeouts, connection failures, credential problems).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescribeError {
    pub code: Option<String>,
    pub message: String,
}

impl DescribeError {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

impl fmt::Display for DescribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{code}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for DescribeError {}

/// Caller-supplied knobs for one wait.
///
/// `max_wait` is mandatory; the delay bounds fall back to the waiter's
/// service defaults.
#[derive(Debug, Clone)]
pub struct WaitConfig {
    pub max_wait: Duration,
    pub min_delay: Option<Duration>,
    pub max_delay: Option<Duration>,
    /// Stop on describe errors no acceptor recognises instead of retrying them.
    pub fail_on_unknown_errors: bool,
    pub cancellation: Option<CancellationToken>,
}

impl WaitConfig {
    pub fn new(max_wait: Duration) -> Self {
        Self {
            max_wait,
            min_delay: None,
            max_delay: None,
            fail_on_unknown_errors: false,
            cancellation: None,
        }
    }

    #[must_use]
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = Some(min_delay);
        self
    }

    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    #[must_use]
    pub fn fail_on_unknown_errors(mut self, enabled: bool) -> Self {
        self.fail_on_unknown_errors = enabled;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// The waiter's service defaults, overridden by whatever was set here.
    pub fn options_for(&self, waiter: SageMakerWaiter) -> WaiterOptions {
        let mut options = waiter.default_options().with_max_wait(self.max_wait);
        if let Some(min_delay) = self.min_delay {
            options = options.with_min_delay(min_delay);
        }
        if let Some(max_delay) = self.max_delay {
            options = options.with_max_delay(max_delay);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_and_status() {
        let described = ResourceDescription::new(
            ResourceKind::Endpoint,
            "my-endpoint",
            Some("Creating".to_string()),
        );
        assert_eq!(described.summary(), "EndpointStatus=Creating");
        assert!(described.status_is("Creating"));
        assert!(!described.status_is("InService"));

        let missing = ResourceDescription::new(ResourceKind::TrainingJob, "job", None);
        assert_eq!(missing.summary(), "TrainingJobStatus=<none>");
    }

    #[test]
    fn test_options_for_uses_service_defaults() {
        let config = WaitConfig::new(Duration::from_secs(3600));
        let options = config.options_for(SageMakerWaiter::ProcessingJobCompletedOrStopped);
        assert_eq!(options.min_delay, Duration::from_secs(60));
        assert_eq!(options.max_delay, Duration::from_secs(120));
        assert_eq!(options.max_wait, Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_options_for_overrides() {
        let config = WaitConfig::new(Duration::from_secs(600))
            .with_min_delay(Duration::from_secs(5))
            .with_max_delay(Duration::from_secs(15));
        let options = config.options_for(SageMakerWaiter::EndpointInService);
        assert_eq!(options.min_delay, Duration::from_secs(5));
        assert_eq!(options.max_delay, Duration::from_secs(15));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_describe_error_display() {
        let err = DescribeError::service("ValidationException", "Could not find endpoint");
        assert_eq!(err.to_string(), "ValidationException: Could not find endpoint");
        assert!(err.has_code("ValidationException"));

        let err = DescribeError::transport("dispatch failure");
        assert_eq!(err.to_string(), "dispatch failure");
        assert!(!err.has_code("ValidationException"));
    }

    #[test]
    fn test_description_json_skips_empty_failure_reason() {
        let described = ResourceDescription::new(
            ResourceKind::NotebookInstance,
            "nb",
            Some("InService".to_string()),
        );
        let json = serde_json::to_value(&described).unwrap();
        assert_eq!(json["kind"], "NotebookInstance");
        assert!(json.get("failure_reason").is_none());
    }
}

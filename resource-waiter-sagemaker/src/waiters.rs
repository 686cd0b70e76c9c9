//! SageMaker waiter definitions: which describe call to poll, which statuses
//! end the wait, and the service's default polling bounds.

use crate::types::{DescribeError, ResourceDescription, ResourceKind};
use resource_waiter_core::{Acceptors, WaiterOptions};
use std::fmt;
use std::str::FromStr;

/// Error code SageMaker returns when the named resource does not exist.
pub const VALIDATION_EXCEPTION: &str = "ValidationException";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SageMakerWaiter {
    EndpointInService,
    EndpointDeleted,
    NotebookInstanceInService,
    NotebookInstanceStopped,
    NotebookInstanceDeleted,
    TrainingJobCompletedOrStopped,
    ProcessingJobCompletedOrStopped,
    TransformJobCompletedOrStopped,
}

impl SageMakerWaiter {
    pub const ALL: [Self; 8] = [
        Self::EndpointInService,
        Self::EndpointDeleted,
        Self::NotebookInstanceInService,
        Self::NotebookInstanceStopped,
        Self::NotebookInstanceDeleted,
        Self::TrainingJobCompletedOrStopped,
        Self::ProcessingJobCompletedOrStopped,
        Self::TransformJobCompletedOrStopped,
    ];

    pub fn resource_kind(self) -> ResourceKind {
        match self {
            Self::EndpointInService | Self::EndpointDeleted => ResourceKind::Endpoint,
            Self::NotebookInstanceInService
            | Self::NotebookInstanceStopped
            | Self::NotebookInstanceDeleted => ResourceKind::NotebookInstance,
            Self::TrainingJobCompletedOrStopped => ResourceKind::TrainingJob,
            Self::ProcessingJobCompletedOrStopped => ResourceKind::ProcessingJob,
            Self::TransformJobCompletedOrStopped => ResourceKind::TransformJob,
        }
    }

    /// Kebab-case name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EndpointInService => "endpoint-in-service",
            Self::EndpointDeleted => "endpoint-deleted",
            Self::NotebookInstanceInService => "notebook-instance-in-service",
            Self::NotebookInstanceStopped => "notebook-instance-stopped",
            Self::NotebookInstanceDeleted => "notebook-instance-deleted",
            Self::TrainingJobCompletedOrStopped => "training-job-completed-or-stopped",
            Self::ProcessingJobCompletedOrStopped => "processing-job-completed-or-stopped",
            Self::TransformJobCompletedOrStopped => "transform-job-completed-or-stopped",
        }
    }

    /// Default `(min_delay, max_delay)` in seconds.
    pub fn default_delays_secs(self) -> (u64, u64) {
        match self {
            Self::EndpointInService
            | Self::EndpointDeleted
            | Self::NotebookInstanceInService
            | Self::NotebookInstanceStopped
            | Self::NotebookInstanceDeleted => (30, 120),
            Self::TrainingJobCompletedOrStopped => (120, 120),
            Self::ProcessingJobCompletedOrStopped | Self::TransformJobCompletedOrStopped => {
                (60, 120)
            }
        }
    }

    pub fn default_options(self) -> WaiterOptions {
        let (min_delay, max_delay) = self.default_delays_secs();
        WaiterOptions::from_secs(min_delay, max_delay)
    }

    /// Acceptor rules for this waiter.
    pub fn acceptors(self) -> Acceptors<ResourceDescription, DescribeError> {
        let acceptors = Acceptors::new().summarize_with(ResourceDescription::summary);
        let not_found = |e: &DescribeError| e.has_code(VALIDATION_EXCEPTION);

        match self {
            Self::EndpointInService => acceptors
                .success_when(|d: &ResourceDescription| d.status_is("InService"))
                .failure_when(|d: &ResourceDescription| d.status_is("Failed"))
                .failure_on_error(not_found),
            Self::EndpointDeleted | Self::NotebookInstanceDeleted => acceptors
                .success_on_error(not_found)
                .failure_when(|d: &ResourceDescription| d.status_is("Failed")),
            Self::NotebookInstanceInService => acceptors
                .success_when(|d: &ResourceDescription| d.status_is("InService"))
                .failure_when(|d: &ResourceDescription| d.status_is("Failed")),
            Self::NotebookInstanceStopped => acceptors
                .success_when(|d: &ResourceDescription| d.status_is("Stopped"))
                .failure_when(|d: &ResourceDescription| d.status_is("Failed")),
            Self::TrainingJobCompletedOrStopped
            | Self::ProcessingJobCompletedOrStopped
            | Self::TransformJobCompletedOrStopped => acceptors
                .success_when(|d: &ResourceDescription| d.status_is("Completed"))
                .success_when(|d: &ResourceDescription| d.status_is("Stopped"))
                .failure_when(|d: &ResourceDescription| d.status_is("Failed"))
                .failure_on_error(not_found),
        }
    }
}

impl fmt::Display for SageMakerWaiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown waiter '{0}'")]
pub struct UnknownWaiter(pub String);

impl FromStr for SageMakerWaiter {
    type Err = UnknownWaiter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownWaiter(s.to_string()))
    }
}

//! Wait logic for the SageMaker waiter service

use crate::error::{SageMakerWaiterError, SageMakerWaiterResult};
use crate::types::{DescribeError, ResourceDescription, WaitConfig};
use crate::waiters::SageMakerWaiter;
use resource_waiter_core::{ResourceStateWaiter, UnmatchedErrors, WaiterOutcome, WaiterSuccess};

impl super::service::SageMakerWaiterService {
    /// Poll `name` until `waiter`'s success or failure acceptors match.
    ///
    /// Returns the raw outcome so callers can inspect every failure category.
    pub async fn wait_for(
        &self,
        waiter: SageMakerWaiter,
        name: &str,
        config: WaitConfig,
    ) -> WaiterOutcome<ResourceDescription, DescribeError> {
        let options = config.options_for(waiter);
        let kind = waiter.resource_kind();

        let mut acceptors = waiter.acceptors();
        if config.fail_on_unknown_errors {
            acceptors = acceptors.unmatched_errors(UnmatchedErrors::Fail);
        }

        log::info!(
            "Waiting for {kind} '{name}' ({waiter}, delay {:?}..{:?}, max wait {:?})",
            options.min_delay,
            options.max_delay,
            config.max_wait
        );

        let mut poller = ResourceStateWaiter::new(format!("{waiter}/{name}"), options, acceptors);
        if let Some(token) = config.cancellation {
            poller = poller.with_cancellation(token);
        }

        let describer = &self.describer;
        poller.wait(|| describer.describe(kind, name)).await
    }

    /// Like [`wait_for`](Self::wait_for), but every non-success outcome becomes a
    /// [`SageMakerWaiterError`].
    pub async fn wait_until(
        &self,
        waiter: SageMakerWaiter,
        name: &str,
        config: WaitConfig,
    ) -> SageMakerWaiterResult<WaiterSuccess<ResourceDescription, DescribeError>> {
        self.wait_for(waiter, name, config)
            .await
            .map_err(|e| SageMakerWaiterError::from_waiter_error(waiter, name, e))
    }
}

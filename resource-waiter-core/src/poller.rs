//! The polling loop.
//!
//! A [`ResourceStateWaiter`] is built per wait and consumed by
//! [`ResourceStateWaiter::wait`]. Each cycle calls `describe`, classifies the
//! result with the waiter's [`Acceptors`], and either returns or sleeps for a
//! delay chosen by the [`Backoff`] policy.
//!
//! Cancellation is observed before each describe call and while sleeping. A
//! describe call already in flight always runs to completion.

use crate::acceptor::{Acceptors, Classification, PollResult, Reason, WaiterState};
use crate::backoff::{Backoff, ExponentialJitter};
use crate::error::{WaiterError, WaiterOutcome, WaiterSuccess};
use crate::observed::ObservedResponses;
use crate::options::WaiterOptions;
use std::fmt;
use std::future::Future;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

/// Polls a describe operation until the resource reaches a terminal state.
pub struct ResourceStateWaiter<R, E> {
    name: String,
    options: WaiterOptions,
    acceptors: Acceptors<R, E>,
    backoff: Box<dyn Backoff>,
    cancellation: Option<CancellationToken>,
}

impl<R, E> fmt::Debug for ResourceStateWaiter<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceStateWaiter")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("acceptors", &self.acceptors)
            .field("cancellable", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

impl<R, E> ResourceStateWaiter<R, E> {
    /// Create a waiter with exponential jittered backoff.
    ///
    /// `name` only appears in log lines.
    pub fn new(name: impl Into<String>, options: WaiterOptions, acceptors: Acceptors<R, E>) -> Self {
        Self {
            name: name.into(),
            options,
            acceptors,
            backoff: Box::new(ExponentialJitter::new(&options)),
            cancellation: None,
        }
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: impl Backoff + 'static) -> Self {
        self.backoff = Box::new(backoff);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &WaiterOptions {
        &self.options
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Run the wait to completion.
    ///
    /// `describe` is called once per poll. Its result decides the next step:
    /// success and failure matches return immediately, anything else sleeps
    /// and polls again until `max_wait` would be exceeded.
    ///
    /// # Notes
    ///
    /// With `max_wait` set to `None` there is no timeout: a resource that never
    /// reaches a terminal state is polled until the wait is cancelled. A
    /// `max_wait` too large to represent as a deadline is treated the same way.
    pub async fn wait<F, Fut>(mut self, mut describe: F) -> WaiterOutcome<R, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: fmt::Display,
    {
        self.options.validate()?;

        let start = Instant::now();
        let deadline = self
            .options
            .max_wait
            .and_then(|max_wait| start.checked_add(max_wait));
        let mut observed = ObservedResponses::new();
        let mut attempts: u32 = 0;
        let mut last: Option<Reason<R, E>> = None;

        loop {
            if self.is_cancelled() {
                log::info!("{}: aborted before attempt {}", self.name, attempts + 1);
                return Err(WaiterError::Aborted {
                    attempts,
                    last,
                    observed,
                });
            }

            let result = describe().await;
            attempts += 1;
            observed.record(self.acceptors.summarize(&result));

            let poll = match (self.acceptors.classify(&result), result) {
                (Classification::Unexpected, Err(error)) => {
                    log::warn!("{}: unexpected error on attempt {attempts}: {error}", self.name);
                    return Err(WaiterError::Unexpected {
                        error,
                        attempts,
                        observed,
                    });
                }
                (Classification::Matched(state), result) => PollResult {
                    state,
                    reason: result.into(),
                },
                // Responses are never classified as unexpected
                (Classification::Unexpected, Ok(response)) => PollResult {
                    state: WaiterState::Retry,
                    reason: Reason::Response(response),
                },
            };

            log::debug!("{}: attempt {attempts} classified as {}", self.name, poll.state);

            match poll.state {
                WaiterState::Success => {
                    let elapsed = start.elapsed();
                    log::info!(
                        "{}: reached success state after {attempts} attempt(s) in {elapsed:?}",
                        self.name
                    );
                    return Ok(WaiterSuccess {
                        reason: poll.reason,
                        attempts,
                        elapsed,
                        observed,
                    });
                }
                WaiterState::Failure => {
                    log::info!(
                        "{}: reached failure state after {attempts} attempt(s)",
                        self.name
                    );
                    return Err(match poll.reason {
                        Reason::Response(response) => WaiterError::FailureState {
                            response,
                            attempts,
                            observed,
                        },
                        Reason::Error(error) => WaiterError::NonRetryable {
                            error,
                            attempts,
                            observed,
                        },
                    });
                }
                WaiterState::Retry => {
                    if let Reason::Error(error) = &poll.reason {
                        log::warn!(
                            "{}: transient error on attempt {attempts}, retrying: {error}",
                            self.name
                        );
                    }
                    last = Some(poll.reason);
                }
            }

            let delay = self.backoff.delay(attempts);
            if let Some(deadline) = deadline {
                if Instant::now()
                    .checked_add(delay)
                    .map_or(true, |wake| wake > deadline)
                {
                    let elapsed = start.elapsed();
                    log::info!(
                        "{}: timed out after {attempts} attempt(s) in {elapsed:?}",
                        self.name
                    );
                    return Err(WaiterError::Timeout {
                        elapsed,
                        attempts,
                        last,
                        observed,
                    });
                }
            }

            log::debug!("{}: sleeping {delay:?} before attempt {}", self.name, attempts + 1);

            match &self.cancellation {
                Some(token) => {
                    tokio::select! {
                        () = sleep(delay) => {}
                        () = token.cancelled() => {
                            log::info!("{}: aborted while waiting", self.name);
                            return Err(WaiterError::Aborted {
                                attempts,
                                last,
                                observed,
                            });
                        }
                    }
                }
                None => sleep(delay).await,
            }
        }
    }
}

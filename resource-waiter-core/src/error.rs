//! Waiter outcome types.

use crate::acceptor::Reason;
use crate::observed::ObservedResponses;
use crate::options::ConfigError;
use std::time::Duration;
use thiserror::Error;

/// The poll that satisfied a success acceptor.
#[derive(Debug, Clone)]
pub struct WaiterSuccess<R, E> {
    /// The response (or, for deletion waiters, the error) that matched.
    pub reason: Reason<R, E>,
    pub attempts: u32,
    pub elapsed: Duration,
    pub observed: ObservedResponses,
}

/// Why a waiter stopped without reaching its success state.
#[derive(Debug, Error)]
pub enum WaiterError<R, E> {
    /// A response matched a failure acceptor.
    #[error("resource reached a failure state after {attempts} attempt(s); observed: {observed}")]
    FailureState {
        response: R,
        attempts: u32,
        observed: ObservedResponses,
    },

    /// The describe call failed with an error classified as non-retryable.
    #[error("non-retryable error after {attempts} attempt(s): {error}")]
    NonRetryable {
        error: E,
        attempts: u32,
        observed: ObservedResponses,
    },

    /// The wait budget ran out before a terminal state was observed.
    #[error("waiter timed out after {elapsed:?} and {attempts} attempt(s); observed: {observed}")]
    Timeout {
        elapsed: Duration,
        attempts: u32,
        last: Option<Reason<R, E>>,
        observed: ObservedResponses,
    },

    /// The caller cancelled the wait.
    #[error("waiter was aborted after {attempts} attempt(s)")]
    Aborted {
        attempts: u32,
        last: Option<Reason<R, E>>,
        observed: ObservedResponses,
    },

    /// An error no acceptor recognised, with unmatched errors configured to fail.
    #[error("unexpected error after {attempts} attempt(s): {error}")]
    Unexpected {
        error: E,
        attempts: u32,
        observed: ObservedResponses,
    },

    #[error("invalid waiter configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

impl<R, E> WaiterError<R, E> {
    /// True for the two terminal failure categories (failure state, non-retryable error).
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::FailureState { .. } | Self::NonRetryable { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::FailureState { attempts, .. }
            | Self::NonRetryable { attempts, .. }
            | Self::Timeout { attempts, .. }
            | Self::Aborted { attempts, .. }
            | Self::Unexpected { attempts, .. } => *attempts,
            Self::InvalidConfiguration(_) => 0,
        }
    }

    pub fn observed(&self) -> Option<&ObservedResponses> {
        match self {
            Self::FailureState { observed, .. }
            | Self::NonRetryable { observed, .. }
            | Self::Timeout { observed, .. }
            | Self::Aborted { observed, .. }
            | Self::Unexpected { observed, .. } => Some(observed),
            Self::InvalidConfiguration(_) => None,
        }
    }

    /// Last thing observed before the waiter stopped, borrowed as a reason.
    pub fn last_reason(&self) -> Option<Reason<&R, &E>> {
        match self {
            Self::FailureState { response, .. } => Some(Reason::Response(response)),
            Self::NonRetryable { error, .. } | Self::Unexpected { error, .. } => {
                Some(Reason::Error(error))
            }
            Self::Timeout { last, .. } | Self::Aborted { last, .. } => {
                last.as_ref().map(|reason| match reason {
                    Reason::Response(r) => Reason::Response(r),
                    Reason::Error(e) => Reason::Error(e),
                })
            }
            Self::InvalidConfiguration(_) => None,
        }
    }
}

/// What a waiter returns.
pub type WaiterOutcome<R, E> = Result<WaiterSuccess<R, E>, WaiterError<R, E>>;

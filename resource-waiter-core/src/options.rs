//! Waiter timing configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Rejected waiter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min_delay must be greater than 0")]
    ZeroMinDelay,
    #[error("max_delay must be greater than 0")]
    ZeroMaxDelay,
    #[error("max_wait must be greater than 0")]
    ZeroMaxWait,
    #[error("max_delay ({max_delay:?}) must be greater than or equal to min_delay ({min_delay:?})")]
    MaxDelayBelowMinDelay {
        min_delay: Duration,
        max_delay: Duration,
    },
    #[error("max_wait ({max_wait:?}) must be greater than min_delay ({min_delay:?})")]
    MaxWaitNotAboveMinDelay {
        min_delay: Duration,
        max_wait: Duration,
    },
}

/// Bounds for the delay between polls and the overall wait budget.
///
/// `max_wait` of `None` means the waiter only stops on a terminal state or
/// cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaiterOptions {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub max_wait: Option<Duration>,
}

impl WaiterOptions {
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay,
            max_delay,
            max_wait: None,
        }
    }

    /// Build options from whole seconds, the unit service waiters are documented in.
    pub fn from_secs(min_delay: u64, max_delay: u64) -> Self {
        Self::new(Duration::from_secs(min_delay), Duration::from_secs(max_delay))
    }

    #[must_use]
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    #[must_use]
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Check the bounds before any poll is issued.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_delay.is_zero() {
            return Err(ConfigError::ZeroMinDelay);
        }
        if self.max_delay.is_zero() {
            return Err(ConfigError::ZeroMaxDelay);
        }
        if self.max_delay < self.min_delay {
            return Err(ConfigError::MaxDelayBelowMinDelay {
                min_delay: self.min_delay,
                max_delay: self.max_delay,
            });
        }
        if let Some(max_wait) = self.max_wait {
            if max_wait.is_zero() {
                return Err(ConfigError::ZeroMaxWait);
            }
            if max_wait <= self.min_delay {
                return Err(ConfigError::MaxWaitNotAboveMinDelay {
                    min_delay: self.min_delay,
                    max_wait,
                });
            }
        }
        Ok(())
    }
}

//! Generic "wait for resource state" primitive.
//!
//! A waiter repeatedly calls a describe operation for a remote resource and
//! classifies each result with a set of [`Acceptors`]:
//! - a success match ends the wait with [`WaiterSuccess`]
//! - a failure match or a non-retryable error ends it with [`WaiterError`]
//! - anything else is retried after a bounded, jittered delay until the
//!   optional `max_wait` budget runs out
//!
//! ```no_run
//! use resource_waiter_core::{Acceptors, ResourceStateWaiter, WaiterOptions};
//! use std::time::Duration;
//!
//! # async fn describe() -> Result<String, std::io::Error> { Ok("InService".into()) }
//! # async fn example() {
//! let acceptors = Acceptors::new()
//!     .success_when(|status: &String| status == "InService")
//!     .failure_when(|status: &String| status == "Failed");
//! let options = WaiterOptions::from_secs(30, 120).with_max_wait(Duration::from_secs(3600));
//!
//! let outcome = ResourceStateWaiter::new("my-endpoint", options, acceptors)
//!     .wait(describe)
//!     .await;
//! # let _ = outcome;
//! # }
//! ```

mod acceptor;
pub mod backoff;
mod error;
mod observed;
mod options;
mod poller;

pub use acceptor::{Acceptors, Classification, PollResult, Reason, UnmatchedErrors, WaiterState};
pub use backoff::{Backoff, ExponentialJitter, Fixed};
pub use error::{WaiterError, WaiterOutcome, WaiterSuccess};
pub use observed::ObservedResponses;
pub use options::{ConfigError, WaiterOptions};
pub use poller::ResourceStateWaiter;

/// Re-exported so callers can cancel a wait without depending on tokio-util directly.
pub use tokio_util::sync::CancellationToken;

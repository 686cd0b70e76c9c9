//! Amazon SageMaker waiters built on `resource-waiter-core`:
//! - Endpoint in service / deleted
//! - Notebook instance in service / stopped / deleted
//! - Training, processing and transform job completed or stopped
//!

mod aws;
pub mod commands;
mod error;
mod types;
mod waiters;

// Re-exports for a small, focused public API
pub use aws::describe::{SageMakerDescriber, SdkDescriber};
pub use aws::AwsSettings;
pub use commands::SageMakerWaiterService;
pub use error::{SageMakerWaiterError, SageMakerWaiterResult};
pub use types::{DescribeError, ResourceDescription, ResourceKind, WaitConfig};
pub use waiters::{SageMakerWaiter, UnknownWaiter, VALIDATION_EXCEPTION};

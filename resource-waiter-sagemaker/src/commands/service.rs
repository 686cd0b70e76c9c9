//! SageMaker Waiter Service Layer
//!
//! The service holds the describe backend and exposes the two wait entry
//! points (`wait_for`, `wait_until`) used by adapters such as the CLI.

use crate::aws::describe::{SageMakerDescriber, SdkDescriber};
use crate::aws::{load_sdk_config, AwsSettings};
use aws_sdk_sagemaker::Client as SageMakerClient;
use std::sync::Arc;

/// Main service struct that holds the describe backend.
#[derive(Clone)]
pub struct SageMakerWaiterService {
    pub(crate) describer: Arc<dyn SageMakerDescriber>,
}

impl SageMakerWaiterService {
    /// Create a service instance from the default credential provider chain.
    pub async fn new() -> Self {
        Self::from_settings(&AwsSettings::default()).await
    }

    /// Create a service instance with an explicit region and/or profile.
    pub async fn from_settings(settings: &AwsSettings) -> Self {
        let config = load_sdk_config(settings).await;
        log::debug!("Loaded AWS configuration (region: {:?})", config.region());
        Self::from_client(SageMakerClient::new(&config))
    }

    pub fn from_client(client: SageMakerClient) -> Self {
        Self::with_describer(Arc::new(SdkDescriber::new(client)))
    }

    /// Use a custom describe backend, e.g. a stub in tests.
    pub fn with_describer(describer: Arc<dyn SageMakerDescriber>) -> Self {
        Self { describer }
    }

    // wait_for() and wait_until() are implemented in wait.rs
}

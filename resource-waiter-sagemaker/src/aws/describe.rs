//! SageMaker describe calls behind the [`SageMakerDescriber`] seam.

use crate::types::{DescribeError, ResourceDescription, ResourceKind};
use async_trait::async_trait;
use aws_sdk_sagemaker::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sagemaker::Client as SageMakerClient;

/// Fetches the current state of one SageMaker resource.
#[async_trait]
pub trait SageMakerDescriber: Send + Sync {
    async fn describe(
        &self,
        kind: ResourceKind,
        name: &str,
    ) -> Result<ResourceDescription, DescribeError>;
}

/// [`SageMakerDescriber`] backed by the AWS SDK.
pub struct SdkDescriber {
    client: SageMakerClient,
}

impl SdkDescriber {
    pub fn new(client: SageMakerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SageMakerDescriber for SdkDescriber {
    async fn describe(
        &self,
        kind: ResourceKind,
        name: &str,
    ) -> Result<ResourceDescription, DescribeError> {
        match kind {
            ResourceKind::Endpoint => {
                let out = self
                    .client
                    .describe_endpoint()
                    .endpoint_name(name)
                    .send()
                    .await
                    .map_err(|e| describe_error(&e))?;
                Ok(ResourceDescription::new(
                    kind,
                    name,
                    status_text::<aws_sdk_sagemaker::types::EndpointStatus>(out.endpoint_status()),
                )
                .with_failure_reason(out.failure_reason().map(str::to_string)))
            }
            ResourceKind::NotebookInstance => {
                let out = self
                    .client
                    .describe_notebook_instance()
                    .notebook_instance_name(name)
                    .send()
                    .await
                    .map_err(|e| describe_error(&e))?;
                Ok(ResourceDescription::new(
                    kind,
                    name,
                    status_text::<aws_sdk_sagemaker::types::NotebookInstanceStatus>(
                        out.notebook_instance_status(),
                    ),
                )
                .with_failure_reason(out.failure_reason().map(str::to_string)))
            }
            ResourceKind::TrainingJob => {
                let out = self
                    .client
                    .describe_training_job()
                    .training_job_name(name)
                    .send()
                    .await
                    .map_err(|e| describe_error(&e))?;
                Ok(ResourceDescription::new(
                    kind,
                    name,
                    status_text::<aws_sdk_sagemaker::types::TrainingJobStatus>(
                        out.training_job_status(),
                    ),
                )
                .with_failure_reason(out.failure_reason().map(str::to_string)))
            }
            ResourceKind::ProcessingJob => {
                let out = self
                    .client
                    .describe_processing_job()
                    .processing_job_name(name)
                    .send()
                    .await
                    .map_err(|e| describe_error(&e))?;
                Ok(ResourceDescription::new(
                    kind,
                    name,
                    status_text::<aws_sdk_sagemaker::types::ProcessingJobStatus>(
                        out.processing_job_status(),
                    ),
                )
                .with_failure_reason(out.failure_reason().map(str::to_string)))
            }
            ResourceKind::TransformJob => {
                let out = self
                    .client
                    .describe_transform_job()
                    .transform_job_name(name)
                    .send()
                    .await
                    .map_err(|e| describe_error(&e))?;
                Ok(ResourceDescription::new(
                    kind,
                    name,
                    status_text::<aws_sdk_sagemaker::types::TransformJobStatus>(
                        out.transform_job_status(),
                    ),
                )
                .with_failure_reason(out.failure_reason().map(str::to_string)))
            }
        }
    }
}

/// Status enums are exposed as `&T` for required members and `Option<&T>`
/// otherwise; both convert into `Option<&T>`.
fn status_text<'a, S>(status: impl Into<Option<&'a S>>) -> Option<String>
where
    S: AsRef<str> + 'a,
{
    status.into().map(|s| s.as_ref().to_string())
}

/// Reduce an SDK error to its service error code, or a transport message when
/// the service never answered.
fn describe_error<E, R>(err: &SdkError<E, R>) -> DescribeError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service_err) => DescribeError::service(
            service_err.code().unwrap_or("Unknown"),
            service_err
                .message()
                .map_or_else(|| DisplayErrorContext(err).to_string(), str::to_string),
        ),
        None => DescribeError::transport(DisplayErrorContext(err).to_string()),
    }
}

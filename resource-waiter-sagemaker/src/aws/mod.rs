//! AWS SDK integration: SageMaker describe calls and shared SDK configuration.

pub(crate) mod describe;

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Where to load AWS configuration from. Empty fields use the default
/// provider chain.
#[derive(Debug, Clone, Default)]
pub struct AwsSettings {
    pub region: Option<String>,
    pub profile: Option<String>,
}

pub(crate) async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &settings.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile) = &settings.profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

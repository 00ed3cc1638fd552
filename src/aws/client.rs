use aws_config::{BehaviorVersion, Region, meta::region::RegionProviderChain};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_iam::Client as IamClient;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_types::SdkConfig;
use tracing::debug;

use super::AwsError;

/// Region used when neither the caller nor the environment names one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// AWS client scoped to the account the CLI operates on.
#[derive(Debug, Clone)]
pub struct AwsClient {
    pub(super) iam: IamClient,
}

impl AwsClient {
    pub fn builder() -> AwsClientBuilder {
        AwsClientBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct AwsClientBuilder {
    region: Option<String>,
    profile: Option<String>,
    endpoint_url: Option<String>,
}

impl AwsClientBuilder {
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// IAM endpoint override, for local stacks.
    pub fn endpoint_url(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url;
        self
    }

    /// Loads the shared AWS config and fails unless it resolves credentials.
    pub async fn build(self) -> Result<AwsClient, AwsError> {
        let region = RegionProviderChain::first_try(self.region.map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(profile) = self.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        check_credentials(&sdk_config).await?;

        let mut iam_config = aws_sdk_iam::config::Builder::from(&sdk_config);
        if let Some(endpoint) = self.endpoint_url {
            debug!(endpoint = %endpoint, "Using custom IAM endpoint");
            iam_config = iam_config.endpoint_url(endpoint);
        }

        debug!(region = ?sdk_config.region(), "Created AWS client");

        Ok(AwsClient {
            iam: IamClient::from_conf(iam_config.build()),
        })
    }
}

async fn check_credentials(sdk_config: &SdkConfig) -> Result<(), AwsError> {
    let provider = sdk_config
        .credentials_provider()
        .ok_or_else(|| AwsError::Credentials("no credentials provider is configured".into()))?;

    provider
        .provide_credentials()
        .await
        .map_err(|err| AwsError::Credentials(DisplayErrorContext(&err).to_string()))?;
    Ok(())
}

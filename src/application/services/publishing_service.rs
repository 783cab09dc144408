use std::sync::Arc;

use crate::application::ports::PlatformClient;
use crate::application::services::CredentialsService;
use crate::domain::{Platform, PublishOutcome};

pub struct PublishingService {
    credentials: Arc<CredentialsService>,
    platform_client: Arc<dyn PlatformClient>,
}

impl PublishingService {
    pub fn new(credentials: Arc<CredentialsService>, platform_client: Arc<dyn PlatformClient>) -> Self {
        Self {
            credentials,
            platform_client,
        }
    }

    /// Never fails: every problem is reported through the outcome.
    #[tracing::instrument(skip(self, content))]
    pub async fn publish(&self, platform: &str, content: &str) -> PublishOutcome {
        let requested = platform.trim().to_lowercase();

        let platform: Platform = match requested.parse() {
            Ok(p) => p,
            Err(_) => {
                tracing::warn!(platform = %requested, "Publish requested for unsupported platform");
                return PublishOutcome::error(format!("Unsupported platform: {}", requested));
            }
        };

        let (client_id, client_secret) = match self.credentials.resolve(&platform.key()).await {
            Ok(Some(creds)) => creds,
            Ok(None) => {
                return PublishOutcome::error(format!(
                    "No credentials found for {}. Please save your API keys first.",
                    platform
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load credentials");
                return PublishOutcome::error(format!("Failed to publish to {}: {}", platform, e));
            }
        };

        match self
            .platform_client
            .publish(platform, &client_id, &client_secret, content)
            .await
        {
            Ok(()) => {
                tracing::info!(platform = %platform, "Post published");
                PublishOutcome::success(
                    platform.as_str(),
                    format!("Successfully published to {}!", platform.display_name()),
                )
            }
            Err(e) => {
                tracing::error!(platform = %platform, error = %e, "Publishing failed");
                PublishOutcome::error(format!("Failed to publish to {}: {}", platform, e))
            }
        }
    }
}

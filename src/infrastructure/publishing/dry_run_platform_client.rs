use async_trait::async_trait;

use crate::application::ports::{PlatformClient, PlatformClientError};
use crate::domain::Platform;
use crate::infrastructure::observability::{mask_identifier, sanitize_prompt};

/// Stands in for the Twitter and LinkedIn APIs until the OAuth callback flow
/// exists. Logs what would have been sent.
pub struct DryRunPlatformClient;

#[async_trait]
impl PlatformClient for DryRunPlatformClient {
    async fn publish(
        &self,
        platform: Platform,
        client_id: &str,
        client_secret: &str,
        content: &str,
    ) -> Result<(), PlatformClientError> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(PlatformClientError::AuthenticationFailed(
                "client id and secret are required".to_string(),
            ));
        }

        let endpoint = match platform {
            Platform::Twitter => "https://api.twitter.com/2/tweets",
            Platform::LinkedIn => "https://api.linkedin.com/v2/ugcPosts",
        };

        tracing::info!(
            platform = %platform,
            endpoint,
            client_id = %mask_identifier(client_id),
            post = %sanitize_prompt(content),
            "Dry-run publish"
        );

        Ok(())
    }
}

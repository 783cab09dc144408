use std::sync::Arc;

use crate::application::ports::{
    CipherError, CredentialsRepository, DatabaseSync, RepositoryError, SecretCipher,
    UpsertOutcome,
};
use crate::domain::{PlatformKey, SocialCredentials};

pub struct CredentialsService {
    repository: Arc<dyn CredentialsRepository>,
    cipher: Arc<dyn SecretCipher>,
    database_sync: Arc<dyn DatabaseSync>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveKeysOutcome {
    pub platform: PlatformKey,
    pub outcome: UpsertOutcome,
}

impl SaveKeysOutcome {
    pub fn message(&self) -> String {
        match self.outcome {
            UpsertOutcome::Created => format!("Saved new credentials for {}.", self.platform),
            UpsertOutcome::Updated => format!("Updated credentials for {}.", self.platform),
        }
    }
}

impl CredentialsService {
    pub fn new(
        repository: Arc<dyn CredentialsRepository>,
        cipher: Arc<dyn SecretCipher>,
        database_sync: Arc<dyn DatabaseSync>,
    ) -> Self {
        Self {
            repository,
            cipher,
            database_sync,
        }
    }

    #[tracing::instrument(skip(self, client_id, client_secret))]
    pub async fn save_keys(
        &self,
        platform: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<SaveKeysOutcome, CredentialsError> {
        let platform = PlatformKey::parse(platform).map_err(CredentialsError::InvalidPlatform)?;

        let encrypted_secret = self.cipher.encrypt(client_secret)?;
        let credentials =
            SocialCredentials::new(platform.clone(), client_id.to_string(), encrypted_secret);

        let outcome = self.repository.upsert(&credentials).await?;
        tracing::info!(platform = %platform, outcome = ?outcome, "Credentials stored");

        if let Err(e) = self.database_sync.upload().await {
            tracing::error!(error = %e, "Failed to sync credentials database to remote");
        }

        Ok(SaveKeysOutcome { platform, outcome })
    }

    /// Client id and decrypted secret for a platform, if stored.
    pub async fn resolve(
        &self,
        platform: &PlatformKey,
    ) -> Result<Option<(String, String)>, CredentialsError> {
        let Some(credentials) = self.repository.find_by_platform(platform).await? else {
            return Ok(None);
        };

        let secret = self.cipher.decrypt(&credentials.encrypted_secret)?;
        Ok(Some((credentials.client_id, secret)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("invalid platform: {0}")]
    InvalidPlatform(String),
    #[error("cipher: {0}")]
    Cipher(#[from] CipherError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::instrument;

use crate::application::ports::{CredentialsRepository, RepositoryError, UpsertOutcome};
use crate::domain::{PlatformKey, SocialCredentials};

pub struct SqliteCredentialsRepository {
    pool: SqlitePool,
}

impl SqliteCredentialsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialsRepository for SqliteCredentialsRepository {
    #[instrument(skip(self, credentials), fields(platform = %credentials.platform))]
    async fn upsert(
        &self,
        credentials: &SocialCredentials,
    ) -> Result<UpsertOutcome, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let existing = sqlx::query("SELECT id FROM social_creds WHERE platform = ?1")
            .bind(credentials.platform.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let outcome = match existing {
            Some(_) => {
                sqlx::query(
                    r#"
                    UPDATE social_creds
                    SET client_id = ?1, encrypted_secret = ?2
                    WHERE platform = ?3
                    "#,
                )
                .bind(&credentials.client_id)
                .bind(&credentials.encrypted_secret)
                .bind(credentials.platform.as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
                UpsertOutcome::Updated
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO social_creds (platform, client_id, encrypted_secret)
                    VALUES (?1, ?2, ?3)
                    "#,
                )
                .bind(credentials.platform.as_str())
                .bind(&credentials.client_id)
                .bind(&credentials.encrypted_secret)
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
                UpsertOutcome::Created
            }
        };

        tx.commit()
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(outcome)
    }

    #[instrument(skip(self), fields(platform = %platform))]
    async fn find_by_platform(
        &self,
        platform: &PlatformKey,
    ) -> Result<Option<SocialCredentials>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT platform, client_id, encrypted_secret
            FROM social_creds
            WHERE platform = ?1
            "#,
        )
        .bind(platform.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stored_platform: String = row
            .try_get("platform")
            .map_err(|e| RepositoryError::InvalidRow(e.to_string()))?;
        let platform = PlatformKey::parse(&stored_platform).map_err(RepositoryError::InvalidRow)?;

        Ok(Some(SocialCredentials {
            platform,
            client_id: row
                .try_get("client_id")
                .map_err(|e| RepositoryError::InvalidRow(e.to_string()))?,
            encrypted_secret: row
                .try_get("encrypted_secret")
                .map_err(|e| RepositoryError::InvalidRow(e.to_string()))?,
        }))
    }
}

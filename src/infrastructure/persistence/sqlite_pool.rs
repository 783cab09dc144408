use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::{info, instrument, warn};

use crate::application::ports::RepositoryError;

/// Opens (creating if needed) the SQLite database and applies migrations.
#[instrument(skip(url))]
pub async fn create_pool(url: &str, max_connections: u32) -> Result<SqlitePool, RepositoryError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?
        .create_if_missing(true)
        // The database file is mirrored remotely as a single file, so no WAL.
        .journal_mode(SqliteJournalMode::Delete)
        .busy_timeout(Duration::from_secs(5));

    let mut retries = 3;
    let mut delay = Duration::from_millis(200);

    let pool = loop {
        match SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => break pool,
            Err(e) if retries > 0 => {
                retries -= 1;
                warn!(
                    error = %e,
                    retries_left = retries,
                    delay_ms = delay.as_millis(),
                    "SQLite connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(RepositoryError::ConnectionFailed(e.to_string())),
        }
    };

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| RepositoryError::MigrationFailed(e.to_string()))?;

    info!("SQLite connection pool established");
    Ok(pool)
}

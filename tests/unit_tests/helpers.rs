use std::collections::HashMap;
use std::sync::Mutex;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use voice_to_post::application::ports::{CredentialsRepository, RepositoryError, UpsertOutcome};
use voice_to_post::domain::{PlatformKey, SocialCredentials};

/// Serves `app` on an ephemeral local port until the returned sender fires.
pub async fn start_mock_server(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

#[derive(Default)]
pub struct InMemoryCredentialsRepository {
    rows: Mutex<HashMap<String, SocialCredentials>>,
}

#[async_trait::async_trait]
impl CredentialsRepository for InMemoryCredentialsRepository {
    async fn upsert(
        &self,
        credentials: &SocialCredentials,
    ) -> Result<UpsertOutcome, RepositoryError> {
        let previous = self
            .rows
            .lock()
            .unwrap()
            .insert(credentials.platform.as_str().to_string(), credentials.clone());
        Ok(match previous {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Created,
        })
    }

    async fn find_by_platform(
        &self,
        platform: &PlatformKey,
    ) -> Result<Option<SocialCredentials>, RepositoryError> {
        Ok(self.rows.lock().unwrap().get(platform.as_str()).cloned())
    }
}

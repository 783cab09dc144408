use std::sync::Arc;

use crate::application::services::{ContextIndexService, CredentialsService, PostPipeline};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PostPipeline>,
    pub credentials_service: Arc<CredentialsService>,
    pub context_index: Arc<ContextIndexService>,
}

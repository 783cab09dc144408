mod context_index_service;
mod credentials_service;
mod post_generation_service;
mod post_pipeline;
mod publishing_service;
mod safety_gatekeeper;

pub use context_index_service::{
    ContextIndexError, ContextIndexService, NO_CONTEXT_DISTANCE, average_distance,
};
pub use credentials_service::{CredentialsError, CredentialsService, SaveKeysOutcome};
pub use post_generation_service::{
    GenerationError, PostGenerationService, format_context, format_news, render_prompt,
};
pub use post_pipeline::{CONTEXT_TOP_K, PipelineError, PipelineOutcome, PostPipeline};
pub use publishing_service::PublishingService;
pub use safety_gatekeeper::{DEFAULT_BLOCKED_TERMS, DEFAULT_THRESHOLD, SafetyGatekeeper};

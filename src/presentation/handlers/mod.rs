mod context;
mod error;
mod generate_post;
mod health;
mod save_keys;

pub use context::add_context_handler;
pub use error::{ErrorResponse, error_response};
pub use generate_post::generate_post_handler;
pub use health::{health_handler, root_handler};
pub use save_keys::save_keys_handler;

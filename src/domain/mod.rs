mod context_entry;
mod embedding;
mod news_article;
mod platform;
mod publish_outcome;
mod safety_score;
mod social_credentials;

pub use context_entry::{ContextEntry, ContextMatch, EntryId};
pub use embedding::Embedding;
pub use news_article::NewsArticle;
pub use platform::{Platform, PlatformKey};
pub use publish_outcome::{PublishOutcome, PublishStatus};
pub use safety_score::SafetyScore;
pub use social_credentials::SocialCredentials;

use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError, NewsSource};
use crate::domain::{ContextMatch, NewsArticle};

const NO_CONTEXT_MESSAGE: &str = "No specific past context found.";
const NEWS_HEADER: &str = "\n\nRelevant Live News context:\n";
const NEWS_QUERY_CHARS: usize = 50;
const NEWS_PAGE_SIZE: usize = 3;

pub struct PostGenerationService {
    llm_client: Arc<dyn LlmClient>,
    news_source: Option<Arc<dyn NewsSource>>,
}

impl PostGenerationService {
    pub fn new(llm_client: Arc<dyn LlmClient>, news_source: Option<Arc<dyn NewsSource>>) -> Self {
        Self {
            llm_client,
            news_source,
        }
    }

    #[tracing::instrument(skip_all, fields(context_matches = matches.len()))]
    pub async fn generate(
        &self,
        transcript: &str,
        matches: &[ContextMatch],
    ) -> Result<String, GenerationError> {
        let mut context = format_context(matches);
        context.push_str(&self.news_context(transcript).await);

        let prompt = render_prompt(&context, transcript);

        let post = self
            .llm_client
            .complete(&prompt)
            .await
            .map_err(GenerationError::Completion)?;

        let post = post.trim().to_string();
        tracing::info!(chars = post.len(), "Post generated");
        Ok(post)
    }

    async fn news_context(&self, transcript: &str) -> String {
        let Some(news_source) = &self.news_source else {
            return String::new();
        };

        let query: String = transcript.chars().take(NEWS_QUERY_CHARS).collect();
        if query.trim().is_empty() {
            return String::new();
        }

        match news_source.search(&query, NEWS_PAGE_SIZE).await {
            Ok(articles) => format_news(&articles),
            Err(e) => {
                tracing::warn!(error = %e, "News lookup failed, continuing without it");
                String::new()
            }
        }
    }
}

pub fn format_context(matches: &[ContextMatch]) -> String {
    if matches.is_empty() {
        return NO_CONTEXT_MESSAGE.to_string();
    }

    matches
        .iter()
        .map(|m| format!("- {}", m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_news(articles: &[NewsArticle]) -> String {
    if articles.is_empty() {
        return String::new();
    }

    let mut out = String::from(NEWS_HEADER);
    for article in articles {
        out.push_str(&format!(
            "- {}: {}\n",
            article.title,
            article.description.as_deref().unwrap_or("")
        ));
    }
    out
}

pub fn render_prompt(context: &str, transcript: &str) -> String {
    format!(
        "You are an expert social media manager and content creator.

Given the following raw thoughts (transcribed from audio) and context retrieved from the user's past posts or knowledge base, 
generate an engaging, native-feeling social media post. 
Make sure the tone is consistent with the context provided, if any. 
Ensure it's highly readable, uses appropriate emojis, and has relevant hashtags.

Context from past posts:
{context}

Raw Thoughts (Audio Transcript):
{transcript}

Generated Social Media Post:"
    )
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Error generating post: {0}")]
    Completion(LlmClientError),
}

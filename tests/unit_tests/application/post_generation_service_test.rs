use std::sync::{Arc, Mutex};

use voice_to_post::application::ports::{LlmClient, LlmClientError, NewsSource, NewsSourceError};
use voice_to_post::application::services::{
    GenerationError, PostGenerationService, format_context, format_news, render_prompt,
};
use voice_to_post::domain::{ContextMatch, NewsArticle};

struct CapturingLlmClient {
    reply: Result<&'static str, ()>,
    prompts: Mutex<Vec<String>>,
}

impl CapturingLlmClient {
    fn replying(reply: &'static str) -> Self {
        Self {
            reply: Ok(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn rate_limited() -> Self {
        Self {
            reply: Err(()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait::async_trait]
impl LlmClient for CapturingLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .map(str::to_string)
            .map_err(|_| LlmClientError::RateLimited)
    }
}

struct StaticNewsSource {
    fail: bool,
    queries: Mutex<Vec<(String, usize)>>,
}

impl StaticNewsSource {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl NewsSource for StaticNewsSource {
    async fn search(
        &self,
        query: &str,
        page_size: usize,
    ) -> Result<Vec<NewsArticle>, NewsSourceError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), page_size));
        if self.fail {
            return Err(NewsSourceError::ApiRequestFailed("timeout".to_string()));
        }
        Ok(vec![NewsArticle {
            title: "Rust 2.0 announced".to_string(),
            description: Some("Big news for systems programmers".to_string()),
        }])
    }
}

fn sample_matches() -> Vec<ContextMatch> {
    vec![
        ContextMatch {
            text: "Loved speaking at RustConf".to_string(),
            distance: 0.4,
        },
        ContextMatch {
            text: "Hiring backend engineers".to_string(),
            distance: 0.9,
        },
    ]
}

#[test]
fn given_no_matches_when_formatting_context_then_returns_placeholder() {
    assert_eq!(format_context(&[]), "No specific past context found.");
}

#[test]
fn given_matches_when_formatting_context_then_renders_bullet_lines() {
    assert_eq!(
        format_context(&sample_matches()),
        "- Loved speaking at RustConf\n- Hiring backend engineers"
    );
}

#[test]
fn given_articles_when_formatting_news_then_renders_header_and_lines() {
    let articles = vec![
        NewsArticle {
            title: "Headline".to_string(),
            description: Some("Summary".to_string()),
        },
        NewsArticle {
            title: "Untitled summary".to_string(),
            description: None,
        },
    ];

    assert_eq!(
        format_news(&articles),
        "\n\nRelevant Live News context:\n- Headline: Summary\n- Untitled summary: \n"
    );
}

#[test]
fn given_no_articles_when_formatting_news_then_returns_empty() {
    assert_eq!(format_news(&[]), "");
}

#[test]
fn given_context_and_transcript_when_rendering_prompt_then_both_sections_present() {
    let prompt = render_prompt("- past post", "my raw thoughts");

    assert!(prompt.starts_with("You are an expert social media manager and content creator."));
    assert!(prompt.contains("Context from past posts:\n- past post\n"));
    assert!(prompt.contains("Raw Thoughts (Audio Transcript):\nmy raw thoughts\n"));
    assert!(prompt.ends_with("Generated Social Media Post:"));
}

#[test]
fn given_transcript_with_braces_when_rendering_prompt_then_it_is_inserted_verbatim() {
    let prompt = render_prompt("{transcript}", "{context}");

    assert!(prompt.contains("Context from past posts:\n{transcript}\n"));
    assert!(prompt.contains("Raw Thoughts (Audio Transcript):\n{context}\n"));
}

#[tokio::test]
async fn given_matches_when_generating_then_prompt_contains_context_and_reply_is_trimmed() {
    let llm = Arc::new(CapturingLlmClient::replying("  Great week! #rust \n"));
    let service = PostGenerationService::new(llm.clone(), None);

    let post = service
        .generate("I gave a talk", &sample_matches())
        .await
        .unwrap();

    assert_eq!(post, "Great week! #rust");
    let prompt = llm.last_prompt();
    assert!(prompt.contains("- Loved speaking at RustConf"));
    assert!(prompt.contains("I gave a talk"));
    assert!(!prompt.contains("Relevant Live News context"));
}

#[tokio::test]
async fn given_news_source_when_generating_then_news_is_appended_to_context() {
    let llm = Arc::new(CapturingLlmClient::replying("post #news"));
    let news = Arc::new(StaticNewsSource::new(false));
    let service = PostGenerationService::new(llm.clone(), Some(news.clone()));
    let transcript = "a".repeat(80);

    service.generate(&transcript, &[]).await.unwrap();

    let prompt = llm.last_prompt();
    assert!(prompt.contains(
        "No specific past context found.\n\nRelevant Live News context:\n- Rust 2.0 announced: Big news for systems programmers\n"
    ));

    let queries = news.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].0.chars().count(), 50);
    assert_eq!(queries[0].1, 3);
}

#[tokio::test]
async fn given_failing_news_source_when_generating_then_post_is_still_generated() {
    let llm = Arc::new(CapturingLlmClient::replying("still fine #ok"));
    let news = Arc::new(StaticNewsSource::new(true));
    let service = PostGenerationService::new(llm.clone(), Some(news));

    let post = service.generate("thoughts", &[]).await.unwrap();

    assert_eq!(post, "still fine #ok");
    assert!(!llm.last_prompt().contains("Relevant Live News context"));
}

#[tokio::test]
async fn given_failing_llm_when_generating_then_returns_completion_error() {
    let service = PostGenerationService::new(Arc::new(CapturingLlmClient::rate_limited()), None);

    let result = service.generate("thoughts", &[]).await;

    let err = result.unwrap_err();
    assert!(matches!(err, GenerationError::Completion(LlmClientError::RateLimited)));
    assert!(err.to_string().starts_with("Error generating post:"));
}

#[tokio::test]
async fn given_blank_llm_reply_when_generating_then_returns_empty_post() {
    let service = PostGenerationService::new(Arc::new(CapturingLlmClient::replying("  \n ")), None);

    let post = service.generate("thoughts", &[]).await.unwrap();

    assert_eq!(post, "");
}

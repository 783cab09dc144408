use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{NewsSource, NewsSourceError};
use crate::domain::NewsArticle;

const DEFAULT_BASE_URL: &str = "https://newsapi.org";

pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    articles: Vec<ArticleDto>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ArticleDto {
    title: Option<String>,
    description: Option<String>,
}

impl NewsApiClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn search(
        &self,
        query: &str,
        page_size: usize,
    ) -> Result<Vec<NewsArticle>, NewsSourceError> {
        let page_size = page_size.to_string();

        let response = self
            .client
            .get(format!("{}/v2/everything", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| NewsSourceError::ApiRequestFailed(e.to_string()))?;

        let http_status = response.status();
        let parsed: EverythingResponse = response
            .json()
            .await
            .map_err(|e| NewsSourceError::InvalidResponse(format!("HTTP {}: {}", http_status, e)))?;

        if parsed.status != "ok" {
            return Err(NewsSourceError::ApiStatus {
                status: parsed.code.unwrap_or(parsed.status),
                message: parsed.message.unwrap_or_default(),
            });
        }

        if parsed.total_results == 0 {
            return Ok(Vec::new());
        }

        let articles: Vec<NewsArticle> = parsed
            .articles
            .into_iter()
            .filter_map(|a| {
                a.title.map(|title| NewsArticle {
                    title,
                    description: a.description,
                })
            })
            .collect();

        tracing::debug!(articles = articles.len(), "News articles fetched");
        Ok(articles)
    }
}

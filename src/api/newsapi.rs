use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::ApiError;
use crate::models::NewsItem;

/// NewsAPI.org client (primary news provider)
#[derive(Clone)]
pub struct NewsApiClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    url: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

impl NewsApiClient {
    const DEFAULT_BASE_URL: &'static str = "https://newsapi.org/v2";

    pub fn new(api_key: String) -> Self {
        Self {
            http_client: super::http_client(),
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing)
    #[allow(dead_code)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http_client: super::http_client(),
            api_key,
            base_url,
        }
    }

    /// English-language articles matching `query`, newest first.
    pub async fn everything(&self, query: &str, page_size: usize) -> Result<Vec<NewsItem>, ApiError> {
        let url = format!("{}/everything", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("q", query.to_string()),
                ("language", "en".to_string()),
                ("pageSize", page_size.to_string()),
                ("sortBy", "publishedAt".to_string()),
                ("apiKey", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let body: EverythingResponse = response.json().await?;
        Ok(body
            .articles
            .into_iter()
            .take(page_size)
            .filter_map(into_news_item)
            .collect())
    }
}

fn into_news_item(article: Article) -> Option<NewsItem> {
    Some(NewsItem {
        title: article.title?,
        source: article
            .source
            .and_then(|s| s.name)
            .unwrap_or_else(|| "unknown".to_string()),
        url: article.url?,
    })
}

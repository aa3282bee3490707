//! News retrieval with ordered provider fallback.
//!
//! A provider is only part of the chain when its API key is configured.
//! A provider failing or returning zero items falls through to the next;
//! an exhausted chain yields an empty list, which the report formatter
//! renders as the fixed "no relevant news" line.

use async_trait::async_trait;
use tracing::warn;

use crate::api::{ApiError, GnewsClient, NewsApiClient};
use crate::config::BotConfig;
use crate::models::NewsItem;

/// Default number of headlines per report.
pub const DEFAULT_MAX_ITEMS: usize = 3;

/// A source of crypto headlines, tried in priority order.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Short provider name for logging
    fn name(&self) -> &'static str;

    async fn latest(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, ApiError>;
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    async fn latest(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, ApiError> {
        // Broad query: symbol plus generic crypto terms
        let query = format!("{} OR crypto OR cryptocurrency OR blockchain", symbol);
        self.everything(&query, limit).await
    }
}

#[async_trait]
impl NewsSource for GnewsClient {
    fn name(&self) -> &'static str {
        "gnews"
    }

    async fn latest(&self, symbol: &str, limit: usize) -> Result<Vec<NewsItem>, ApiError> {
        // Narrow query: the symbol alone
        self.search(symbol, limit).await
    }
}

/// News facade used by the analysis pipeline.
pub struct NewsService {
    sources: Vec<Box<dyn NewsSource>>,
    max_items: usize,
}

impl NewsService {
    /// Build the chain from configured credentials. Zero configured keys is
    /// a valid state: the chain is empty and every query returns no items.
    pub fn from_config(config: &BotConfig) -> Self {
        let mut sources: Vec<Box<dyn NewsSource>> = Vec::new();
        if let Some(key) = &config.news_api_key {
            sources.push(Box::new(NewsApiClient::new(key.clone())));
        }
        if let Some(key) = &config.gnews_api_key {
            sources.push(Box::new(GnewsClient::new(key.clone())));
        }
        Self::with_sources(sources, DEFAULT_MAX_ITEMS)
    }

    pub fn with_sources(sources: Vec<Box<dyn NewsSource>>, max_items: usize) -> Self {
        Self { sources, max_items }
    }

    /// Up to `max_items` headlines for `symbol`, in provider relevance
    /// order. Empty when no provider is configured, every provider fails,
    /// or every provider returns zero items.
    pub async fn latest(&self, symbol: &str) -> Vec<NewsItem> {
        for source in &self.sources {
            match source.latest(symbol, self.max_items).await {
                Ok(items) if !items.is_empty() => {
                    let mut items = items;
                    items.truncate(self.max_items);
                    return items;
                }
                Ok(_) => {
                    warn!("News source '{}' returned no items for {}", source.name(), symbol);
                }
                Err(e) => {
                    warn!("News source '{}' failed for {}: {}", source.name(), symbol, e);
                }
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn item(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            source: "Wire".to_string(),
            url: format!("https://example.com/{}", title),
        }
    }

    struct Stub {
        items: Vec<NewsItem>,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl Stub {
        fn returning(items: Vec<NewsItem>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    items,
                    fail: false,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }

        fn failing() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    items: Vec::new(),
                    fail: true,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl NewsSource for Stub {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn latest(&self, _symbol: &str, _limit: usize) -> Result<Vec<NewsItem>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApiError::Malformed("boom".to_string()));
            }
            Ok(self.items.clone())
        }
    }

    #[tokio::test]
    async fn no_configured_sources_yield_no_items() {
        let service = NewsService::with_sources(Vec::new(), 3);
        assert!(service.latest("BTC").await.is_empty());
    }

    #[tokio::test]
    async fn primary_with_items_stops_the_chain() {
        let (primary, _) = Stub::returning(vec![item("a")]);
        let (secondary, secondary_calls) = Stub::returning(vec![item("b")]);
        let service =
            NewsService::with_sources(vec![Box::new(primary), Box::new(secondary)], 3);

        let items = service.latest("BTC").await;
        assert_eq!(items, vec![item("a")]);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_primary_falls_through_to_secondary() {
        let (primary, primary_calls) = Stub::returning(Vec::new());
        let (secondary, _) = Stub::returning(vec![item("b")]);
        let service =
            NewsService::with_sources(vec![Box::new(primary), Box::new(secondary)], 3);

        let items = service.latest("BTC").await;
        assert_eq!(items, vec![item("b")]);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_primary_falls_through_to_secondary() {
        let (primary, _) = Stub::failing();
        let (secondary, _) = Stub::returning(vec![item("b")]);
        let service =
            NewsService::with_sources(vec![Box::new(primary), Box::new(secondary)], 3);

        assert_eq!(service.latest("BTC").await, vec![item("b")]);
    }

    #[tokio::test]
    async fn results_are_capped_at_max_items() {
        let (primary, _) = Stub::returning(vec![item("a"), item("b"), item("c"), item("d")]);
        let service = NewsService::with_sources(vec![Box::new(primary)], 2);

        assert_eq!(service.latest("BTC").await.len(), 2);
    }
}

use std::collections::HashMap;

use chrono::DateTime;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::ApiError;
use crate::models::PricePoint;

/// CoinGecko public API client, used as the spot-price fallback and the
/// historical-series provider.
#[derive(Clone)]
pub struct CoingeckoClient {
    http_client: HttpClient,
    base_url: String,
}

/// GET /coins/{id}/market_chart
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    /// `[unix_millis, price]` pairs in ascending time order
    prices: Vec<(i64, f64)>,
}

impl CoingeckoClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";

    pub fn new() -> Self {
        Self {
            http_client: super::http_client(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing)
    #[allow(dead_code)]
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: super::http_client(),
            base_url,
        }
    }

    /// Current USD price of a coin by CoinGecko id, e.g. "bitcoin".
    pub async fn simple_price(&self, gecko_id: &str) -> Result<f64, ApiError> {
        let url = format!("{}/simple/price", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("ids", gecko_id), ("vs_currencies", "usd")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let body: HashMap<String, HashMap<String, f64>> = response.json().await?;
        body.get(gecko_id)
            .and_then(|quotes| quotes.get("usd"))
            .copied()
            .ok_or_else(|| ApiError::Malformed(format!("no usd quote for '{}'", gecko_id)))
    }

    /// USD price series covering the last `days` days, ordered by time.
    pub async fn market_chart(&self, gecko_id: &str, days: u32) -> Result<Vec<PricePoint>, ApiError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, gecko_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("vs_currency", "usd".to_string()), ("days", days.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let chart: MarketChartResponse = response.json().await?;
        let points = chart
            .prices
            .into_iter()
            .filter_map(|(millis, price)| {
                DateTime::from_timestamp_millis(millis)
                    .map(|timestamp| PricePoint { timestamp, price })
            })
            .collect();

        Ok(points)
    }
}

impl Default for CoingeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

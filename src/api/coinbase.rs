use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::ApiError;
use crate::models::OrderBookSnapshot;

/// Coinbase Exchange public market-data client
#[derive(Clone)]
pub struct CoinbaseClient {
    http_client: HttpClient,
    base_url: String,
}

/// GET /products/{product}/ticker
#[derive(Debug, Deserialize)]
struct TickerResponse {
    price: String,
}

/// GET /products/{product}/book?level=1
///
/// Each side is a list of `[price, size, num_orders]` rows; level 1 carries
/// only the best row per side.
#[derive(Debug, Deserialize)]
struct BookResponse {
    bids: Vec<(String, String, u64)>,
    asks: Vec<(String, String, u64)>,
}

impl CoinbaseClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.exchange.coinbase.com";

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

    /// Last traded price for a product, e.g. "BTC-USD".
    pub async fn ticker_price(&self, product: &str) -> Result<f64, ApiError> {
        let url = format!("{}/products/{}/ticker", self.base_url, product);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let ticker: TickerResponse = response.json().await?;
        ticker
            .price
            .parse()
            .map_err(|_| ApiError::Malformed(format!("unparseable price '{}'", ticker.price)))
    }

    /// Best bid/ask for a product from the level-1 book.
    pub async fn level1_book(&self, product: &str) -> Result<OrderBookSnapshot, ApiError> {
        let url = format!("{}/products/{}/book?level=1", self.base_url, product);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let book: BookResponse = response.json().await?;
        let bid = book
            .bids
            .first()
            .ok_or_else(|| ApiError::Malformed("empty bid side".to_string()))?;
        let ask = book
            .asks
            .first()
            .ok_or_else(|| ApiError::Malformed("empty ask side".to_string()))?;

        Ok(OrderBookSnapshot {
            bid_price: parse_decimal(&bid.0)?,
            bid_qty: parse_decimal(&bid.1)?,
            ask_price: parse_decimal(&ask.0)?,
            ask_qty: parse_decimal(&ask.1)?,
        })
    }
}

impl Default for CoinbaseClient {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_decimal(raw: &str) -> Result<f64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Malformed(format!("unparseable decimal '{}'", raw)))
}

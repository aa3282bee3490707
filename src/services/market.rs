//! Market data access with ordered provider fallback.
//!
//! Transient provider failures never escape this module: every operation
//! degrades to an absent value (`None` / empty series) and logs the cause,
//! so the scheduling loop never sees an `Err` from market data.

use async_trait::async_trait;
use tracing::warn;

use crate::api::{ApiError, CoinbaseClient, CoingeckoClient};
use crate::models::{Instrument, OrderBookSnapshot, PricePoint};

/// A source of USD spot prices, tried in priority order.
#[async_trait]
pub trait SpotPriceSource: Send + Sync {
    /// Short provider name for logging
    fn name(&self) -> &'static str;

    async fn spot_price(&self, instrument: &Instrument) -> Result<f64, ApiError>;
}

#[async_trait]
impl SpotPriceSource for CoinbaseClient {
    fn name(&self) -> &'static str {
        "coinbase"
    }

    async fn spot_price(&self, instrument: &Instrument) -> Result<f64, ApiError> {
        self.ticker_price(instrument.product).await
    }
}

#[async_trait]
impl SpotPriceSource for CoingeckoClient {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn spot_price(&self, instrument: &Instrument) -> Result<f64, ApiError> {
        self.simple_price(instrument.gecko_id).await
    }
}

/// First price produced by the chain, or `None` when every source fails.
async fn first_available_price(
    sources: &[Box<dyn SpotPriceSource>],
    instrument: &Instrument,
) -> Option<f64> {
    for source in sources {
        match source.spot_price(instrument).await {
            Ok(price) => return Some(price),
            Err(e) => {
                warn!(
                    "Spot price source '{}' failed for {}: {}",
                    source.name(),
                    instrument.id,
                    e
                );
            }
        }
    }
    None
}

/// Market data facade used by the analysis pipeline.
pub struct MarketDataService {
    price_sources: Vec<Box<dyn SpotPriceSource>>,
    coinbase: CoinbaseClient,
    coingecko: CoingeckoClient,
}

impl MarketDataService {
    pub fn new() -> Self {
        let coinbase = CoinbaseClient::new();
        let coingecko = CoingeckoClient::new();
        Self {
            price_sources: vec![Box::new(coinbase.clone()), Box::new(coingecko.clone())],
            coinbase,
            coingecko,
        }
    }

    /// Current USD spot price. Primary source first, fallback second; both
    /// failing yields `None`, never an error.
    pub async fn spot_price(&self, instrument: &Instrument) -> Option<f64> {
        first_available_price(&self.price_sources, instrument).await
    }

    /// Best bid/ask. `None` means "unknown", not "zero liquidity".
    pub async fn order_book(&self, instrument: &Instrument) -> Option<OrderBookSnapshot> {
        match self.coinbase.level1_book(instrument.product).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Order book fetch failed for {}: {}", instrument.id, e);
                None
            }
        }
    }

    /// Price series for the last `days` days; empty on any failure.
    pub async fn history(&self, instrument: &Instrument, days: u32) -> Vec<PricePoint> {
        match self.coingecko.market_chart(instrument.gecko_id, days).await {
            Ok(points) => points,
            Err(e) => {
                warn!("History fetch failed for {}: {}", instrument.id, e);
                Vec::new()
            }
        }
    }
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TRACKED;

    struct Fixed(f64);

    #[async_trait]
    impl SpotPriceSource for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn spot_price(&self, _instrument: &Instrument) -> Result<f64, ApiError> {
            Ok(self.0)
        }
    }

    struct Failing;

    #[async_trait]
    impl SpotPriceSource for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn spot_price(&self, _instrument: &Instrument) -> Result<f64, ApiError> {
            Err(ApiError::Malformed("boom".to_string()))
        }
    }

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let sources: Vec<Box<dyn SpotPriceSource>> =
            vec![Box::new(Fixed(65000.12)), Box::new(Fixed(1.0))];
        let price = first_available_price(&sources, &TRACKED[0]).await;
        assert_eq!(price, Some(65000.12));
    }

    #[tokio::test]
    async fn primary_failure_falls_back() {
        let sources: Vec<Box<dyn SpotPriceSource>> =
            vec![Box::new(Failing), Box::new(Fixed(42.5))];
        let price = first_available_price(&sources, &TRACKED[0]).await;
        assert_eq!(price, Some(42.5));
    }

    #[tokio::test]
    async fn all_failures_yield_absent() {
        let sources: Vec<Box<dyn SpotPriceSource>> = vec![Box::new(Failing), Box::new(Failing)];
        let price = first_available_price(&sources, &TRACKED[0]).await;
        assert_eq!(price, None);
    }

    #[tokio::test]
    async fn empty_chain_yields_absent() {
        let sources: Vec<Box<dyn SpotPriceSource>> = Vec::new();
        assert_eq!(first_available_price(&sources, &TRACKED[0]).await, None);
    }
}

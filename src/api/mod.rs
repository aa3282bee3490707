//! Thin HTTP clients for all external providers.
//!
//! Every client owns its own `reqwest::Client` built with the shared
//! per-request timeout so a slow provider can never stall the scheduling
//! loop indefinitely.

pub mod coinbase;
pub mod coingecko;
pub mod gnews;
pub mod newsapi;
pub mod telegram;

use std::time::Duration;

use thiserror::Error;

pub use coinbase::CoinbaseClient;
pub use coingecko::CoingeckoClient;
pub use gnews::GnewsClient;
pub use newsapi::NewsApiClient;
pub use telegram::TelegramClient;

/// Timeout applied to every outbound provider call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Error type shared by all outbound API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure or timeout
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-success HTTP status
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    /// Body parsed but the expected field was missing or unparseable
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Build the reqwest client used by every provider wrapper.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("failed to build HTTP client")
}

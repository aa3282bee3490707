//! Market data models

use chrono::{DateTime, Utc};

/// A single data point on a price chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Best bid and ask at a point in time.
///
/// Absence (fetch failure) is expressed as `Option<OrderBookSnapshot>` =
/// `None` by callers, never as an all-zero snapshot, so an unavailable book
/// can never be mistaken for a zero-liquidity market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderBookSnapshot {
    pub bid_price: f64,
    pub bid_qty: f64,
    pub ask_price: f64,
    pub ask_qty: f64,
}

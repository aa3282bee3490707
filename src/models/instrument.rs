//! Tracked instrument definitions

/// A crypto instrument tracked by the hourly analysis loop.
///
/// Instruments are defined at compile time and immutable during execution.
/// Each one carries the per-provider identifiers needed to query it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    /// Canonical id, e.g. "bitcoin"
    pub id: &'static str,
    /// Display symbol used in reports and news queries, e.g. "BTC"
    pub symbol: &'static str,
    /// Coinbase Exchange product id, e.g. "BTC-USD"
    pub product: &'static str,
    /// CoinGecko id used for spot-price fallback and history
    pub gecko_id: &'static str,
}

/// The instruments analyzed on every tick, in delivery order.
pub const TRACKED: [Instrument; 3] = [
    Instrument {
        id: "bitcoin",
        symbol: "BTC",
        product: "BTC-USD",
        gecko_id: "bitcoin",
    },
    Instrument {
        id: "ethereum",
        symbol: "ETH",
        product: "ETH-USD",
        gecko_id: "ethereum",
    },
    Instrument {
        id: "ripple",
        symbol: "XRP",
        product: "XRP-USD",
        gecko_id: "ripple",
    },
];

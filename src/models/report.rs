//! Analysis report models

use chrono::DateTime;
use chrono_tz::Tz;

use super::instrument::Instrument;
use super::market::OrderBookSnapshot;
use super::news::NewsItem;

/// Trend classification derived from spot price vs. moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
    /// Either operand was absent
    Unknown,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => write!(f, "Bullish"),
            Trend::Bearish => write!(f, "Bearish"),
            Trend::Neutral => write!(f, "Neutral"),
            Trend::Unknown => write!(f, "N/A"),
        }
    }
}

/// RSI classification against the standard 30/70 thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiState {
    Oversold,
    Overbought,
    Neutral,
    /// RSI was absent
    Unknown,
}

impl std::fmt::Display for RsiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RsiState::Oversold => write!(f, "Oversold"),
            RsiState::Overbought => write!(f, "Overbought"),
            RsiState::Neutral => write!(f, "Neutral"),
            RsiState::Unknown => write!(f, "N/A"),
        }
    }
}

/// Suggested buy/sell levels derived from the look-back window extremes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestedLevels {
    pub buy: f64,
    pub sell: f64,
}

/// Everything gathered for one instrument during one scheduling tick.
///
/// Only the instrument identity and the generation timestamp are required;
/// every other field tolerates an absent value so the report can still be
/// delivered when a subset of providers is down.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub instrument: Instrument,
    /// Wall-clock time of report generation in the analysis timezone
    pub generated_at: DateTime<Tz>,
    pub price: Option<f64>,
    pub order_book: Option<OrderBookSnapshot>,
    pub sma: Option<f64>,
    pub rsi: Option<f64>,
    pub levels: Option<SuggestedLevels>,
    pub trend: Trend,
    pub rsi_state: RsiState,
    pub chart_png: Option<Vec<u8>>,
    pub news: Vec<NewsItem>,
}

//! Technical indicators derived from a price series.
//!
//! All functions are pure. Every indicator is `None` until the series is
//! long enough; a spurious numeric value is never produced for short input.

use chrono::{DateTime, Utc};

use crate::models::{PricePoint, RsiState, SuggestedLevels, Trend};

/// Trailing simple moving average over the last `window` values.
///
/// `None` if fewer than `window` values are available.
pub fn moving_average(prices: &[f64], window: usize) -> Option<f64> {
    if window == 0 || prices.len() < window {
        return None;
    }
    let tail = &prices[prices.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Wilder-style RSI from simple rolling means of gains and losses.
///
/// Requires `period + 1` prices (i.e. `period` period-over-period deltas).
/// A window with no down-moves saturates to exactly 100. A completely flat
/// window (no gains and no losses) is indeterminate and yields `None` rather
/// than a NaN or an arbitrary midpoint.
pub fn relative_strength_index(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }

    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let recent = &deltas[deltas.len() - period..];

    let mean_gain = recent.iter().filter(|d| **d > 0.0).sum::<f64>() / period as f64;
    let mean_loss = -recent.iter().filter(|d| **d < 0.0).sum::<f64>() / period as f64;

    if mean_loss == 0.0 {
        if mean_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }

    let rs = mean_gain / mean_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Suggested buy/sell levels from the window extremes:
/// buy = round(min * 1.02, 2), sell = round(max * 0.98, 2).
pub fn suggested_levels(prices: &[f64]) -> Option<SuggestedLevels> {
    if prices.is_empty() {
        return None;
    }
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(SuggestedLevels {
        buy: round2(min * 1.02),
        sell: round2(max * 0.98),
    })
}

/// Bullish above the moving average, Bearish below, Neutral on equality.
pub fn classify_trend(price: Option<f64>, sma: Option<f64>) -> Trend {
    match (price, sma) {
        (Some(p), Some(m)) if p > m => Trend::Bullish,
        (Some(p), Some(m)) if p < m => Trend::Bearish,
        (Some(_), Some(_)) => Trend::Neutral,
        _ => Trend::Unknown,
    }
}

/// Oversold below 30, Overbought above 70, Neutral between.
pub fn classify_rsi(rsi: Option<f64>) -> RsiState {
    match rsi {
        Some(v) if v < 30.0 => RsiState::Oversold,
        Some(v) if v > 70.0 => RsiState::Overbought,
        Some(_) => RsiState::Neutral,
        None => RsiState::Unknown,
    }
}

/// Per-point moving-average series for chart overlay, aligned to the input
/// timestamps. Starts at the first point with a full window behind it.
pub fn moving_average_series(points: &[PricePoint], window: usize) -> Vec<(DateTime<Utc>, f64)> {
    if window == 0 || points.len() < window {
        return Vec::new();
    }
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    (window..=points.len())
        .map(|end| {
            let mean = prices[end - window..end].iter().sum::<f64>() / window as f64;
            (points[end - 1].timestamp, mean)
        })
        .collect()
}

/// Per-point RSI series for chart overlay. Points whose window is flat
/// (indeterminate RSI) are skipped.
pub fn rsi_series(points: &[PricePoint], period: usize) -> Vec<(DateTime<Utc>, f64)> {
    if period == 0 || points.len() < period + 1 {
        return Vec::new();
    }
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    (period + 1..=points.len())
        .filter_map(|end| {
            relative_strength_index(&prices[..end], period)
                .map(|rsi| (points[end - 1].timestamp, rsi))
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

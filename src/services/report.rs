//! Report formatting.
//!
//! Pure text assembly: absent values degrade to an explicit "N/A"
//! placeholder, never to a fabricated number, a blank message or a panic.

use crate::models::AnalysisReport;
use crate::utils::{format_qty, format_usd};

/// Fixed line rendered when no provider returned any headline.
pub const NO_NEWS_SENTINEL: &str = "📰 No relevant news available.";

const DISCLAIMER: &str = "_This analysis is educational, not financial advice._";

/// Assemble the delivery message for one instrument's report.
pub fn format_report(report: &AnalysisReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "📊 *Educational analysis: {}*",
        report.instrument.symbol
    ));
    lines.push(format!(
        "⏱ {} (America/Bogota)",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(String::new());

    lines.push(match report.price {
        Some(price) => format!("💵 *Spot price:* ${}", format_usd(price)),
        None => "💵 *Spot price:* N/A".to_string(),
    });

    match &report.order_book {
        Some(book) => {
            lines.push(format!(
                "🟢 *Bid:* ${} (qty: {})",
                format_usd(book.bid_price),
                format_qty(book.bid_qty)
            ));
            lines.push(format!(
                "🔴 *Ask:* ${} (qty: {})",
                format_usd(book.ask_price),
                format_qty(book.ask_qty)
            ));
        }
        None => {
            lines.push("🟢 *Bid:* N/A".to_string());
            lines.push("🔴 *Ask:* N/A".to_string());
        }
    }

    lines.push(match &report.levels {
        Some(levels) => format!(
            "💡 *Suggested levels:* buy ~ ${} / sell ~ ${}",
            format_usd(levels.buy),
            format_usd(levels.sell)
        ),
        None => "💡 *Suggested levels:* N/A".to_string(),
    });

    lines.push(match report.sma {
        Some(sma) => format!("📐 *SMA20:* ${}", format_usd(sma)),
        None => "📐 *SMA20:* N/A".to_string(),
    });
    lines.push(format!("📈 *Trend:* {}", report.trend));
    lines.push(match report.rsi {
        Some(rsi) => format!("🧭 *RSI14:* {:.1}", rsi),
        None => "🧭 *RSI14:* N/A".to_string(),
    });
    lines.push(format!("📉 *RSI state:* {}", report.rsi_state));
    lines.push(String::new());

    if report.news.is_empty() {
        lines.push(NO_NEWS_SENTINEL.to_string());
    } else {
        lines.push("📰 *Relevant news:*".to_string());
        for item in &report.news {
            lines.push(format!("• {} ({})", item.title, item.source));
            lines.push(format!("  {}", item.url));
        }
    }

    lines.push(String::new());
    lines.push(DISCLAIMER.to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Instrument, NewsItem, OrderBookSnapshot, RsiState, SuggestedLevels, Trend, TRACKED,
    };
    use crate::services::indicators;
    use chrono::TimeZone;
    use chrono_tz::America::Bogota;

    fn base_report(instrument: Instrument) -> AnalysisReport {
        AnalysisReport {
            instrument,
            generated_at: Bogota.with_ymd_and_hms(2024, 3, 5, 14, 0, 5).unwrap(),
            price: None,
            order_book: None,
            sma: None,
            rsi: None,
            levels: None,
            trend: Trend::Unknown,
            rsi_state: RsiState::Unknown,
            chart_png: None,
            news: Vec::new(),
        }
    }

    #[test]
    fn fully_absent_report_degrades_to_placeholders() {
        let text = format_report(&base_report(TRACKED[0]));

        assert!(text.contains("Educational analysis: BTC"));
        assert!(text.contains("2024-03-05 14:00:05"));
        assert!(text.contains("💵 *Spot price:* N/A"));
        assert!(text.contains("🟢 *Bid:* N/A"));
        assert!(text.contains("🔴 *Ask:* N/A"));
        assert!(text.contains("💡 *Suggested levels:* N/A"));
        assert!(text.contains("📐 *SMA20:* N/A"));
        assert!(text.contains("📈 *Trend:* N/A"));
        assert!(text.contains("🧭 *RSI14:* N/A"));
        assert!(text.contains("📉 *RSI state:* N/A"));
        assert!(text.contains(NO_NEWS_SENTINEL));
        assert!(text.contains("not financial advice"));
    }

    #[test]
    fn present_values_render_with_separators() {
        let mut report = base_report(TRACKED[0]);
        report.price = Some(65000.12);
        report.order_book = Some(OrderBookSnapshot {
            bid_price: 65000.0,
            bid_qty: 1.2,
            ask_price: 65001.0,
            ask_qty: 0.8,
        });
        report.levels = Some(SuggestedLevels {
            buy: 63648.83,
            sell: 64370.98,
        });
        report.sma = Some(64850.5);
        report.rsi = Some(56.3);
        report.trend = Trend::Bullish;
        report.rsi_state = RsiState::Neutral;
        report.news = vec![NewsItem {
            title: "Bitcoin climbs".to_string(),
            source: "Wire".to_string(),
            url: "https://example.com/btc".to_string(),
        }];

        let text = format_report(&report);
        assert!(text.contains("💵 *Spot price:* $65,000.12"));
        assert!(text.contains("🟢 *Bid:* $65,000.00 (qty: 1.2)"));
        assert!(text.contains("🔴 *Ask:* $65,001.00 (qty: 0.8)"));
        assert!(text.contains("buy ~ $63,648.83 / sell ~ $64,370.98"));
        assert!(text.contains("📐 *SMA20:* $64,850.50"));
        assert!(text.contains("🧭 *RSI14:* 56.3"));
        assert!(text.contains("📈 *Trend:* Bullish"));
        assert!(text.contains("• Bitcoin climbs (Wire)"));
        assert!(text.contains("  https://example.com/btc"));
        assert!(!text.contains(NO_NEWS_SENTINEL));
    }

    // Ten rising points: enough for suggested levels, too few for SMA20 and
    // RSI14, so the report carries real levels next to N/A indicator lines.
    #[test]
    fn short_history_yields_levels_but_na_indicators() {
        let prices: Vec<f64> = (0..10).map(|i| 64000.0 + 100.0 * i as f64).collect();

        let sma = indicators::moving_average(&prices, 20);
        let rsi = indicators::relative_strength_index(&prices, 14);
        assert_eq!(sma, None);
        assert_eq!(rsi, None);

        let mut report = base_report(TRACKED[0]);
        report.price = Some(65000.12);
        report.order_book = Some(OrderBookSnapshot {
            bid_price: 65000.0,
            bid_qty: 1.2,
            ask_price: 65001.0,
            ask_qty: 0.8,
        });
        report.sma = sma;
        report.rsi = rsi;
        report.levels = indicators::suggested_levels(&prices);
        report.trend = indicators::classify_trend(report.price, sma);
        report.rsi_state = indicators::classify_rsi(rsi);

        let text = format_report(&report);
        assert!(text.contains("📐 *SMA20:* N/A"));
        assert!(text.contains("📈 *Trend:* N/A"));
        assert!(text.contains("🧭 *RSI14:* N/A"));
        assert!(text.contains("📉 *RSI state:* N/A"));
        // buy = round(64000 * 1.02), sell = round(64900 * 0.98)
        assert!(text.contains("buy ~ $65,280.00 / sell ~ $63,602.00"));
        assert!(text.contains(NO_NEWS_SENTINEL));
    }
}

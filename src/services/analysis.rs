//! Per-instrument analysis pipeline.
//!
//! Gathers market data, derives indicators, renders the chart, pulls news,
//! formats the report and delivers it. Data gathering degrades field by
//! field; only delivery failures surface as errors, caught at the
//! per-instrument boundary in the scheduling loop.

use chrono::Utc;
use tracing::{info, warn};

use crate::api::{ApiError, TelegramClient};
use crate::config::BotConfig;
use crate::models::{AnalysisReport, Instrument};
use crate::scheduler::ANALYSIS_TZ;
use crate::services::market::MarketDataService;
use crate::services::news::NewsService;
use crate::services::{chart, indicators, report};

/// Look-back window for history, levels and the chart.
pub const HISTORY_DAYS: u32 = 3;
pub const SMA_WINDOW: usize = 20;
pub const RSI_PERIOD: usize = 14;

/// Everything the pipeline needs, wired once at startup. No globals.
pub struct AnalysisContext {
    pub market: MarketDataService,
    pub news: NewsService,
    pub telegram: TelegramClient,
}

impl AnalysisContext {
    pub fn new(config: &BotConfig) -> Self {
        Self {
            market: MarketDataService::new(),
            news: NewsService::from_config(config),
            telegram: TelegramClient::new(config.telegram_token.clone(), config.chat_id),
        }
    }
}

/// Gather all data for one instrument and assemble the report.
pub async fn build_report(ctx: &AnalysisContext, instrument: Instrument) -> AnalysisReport {
    let generated_at = Utc::now().with_timezone(&ANALYSIS_TZ);

    let price = ctx.market.spot_price(&instrument).await;
    let order_book = ctx.market.order_book(&instrument).await;
    let history = ctx.market.history(&instrument, HISTORY_DAYS).await;

    let prices: Vec<f64> = history.iter().map(|p| p.price).collect();
    let sma = indicators::moving_average(&prices, SMA_WINDOW);
    let rsi = indicators::relative_strength_index(&prices, RSI_PERIOD);
    let levels = indicators::suggested_levels(&prices);
    let trend = indicators::classify_trend(price, sma);
    let rsi_state = indicators::classify_rsi(rsi);

    let sma_overlay = indicators::moving_average_series(&history, SMA_WINDOW);
    let rsi_overlay = indicators::rsi_series(&history, RSI_PERIOD);

    // Rasterization is synchronous CPU work; keep it off the runtime threads
    // so the liveness endpoint stays responsive.
    let symbol = instrument.symbol;
    let chart_png = tokio::task::spawn_blocking(move || {
        chart::render(&history, &sma_overlay, &rsi_overlay, symbol, HISTORY_DAYS)
    })
    .await
    .unwrap_or_else(|e| {
        warn!("Chart rendering task failed for {}: {}", symbol, e);
        None
    });

    let news = ctx.news.latest(instrument.symbol).await;

    AnalysisReport {
        instrument,
        generated_at,
        price,
        order_book,
        sma,
        rsi,
        levels,
        trend,
        rsi_state,
        chart_png,
        news,
    }
}

/// Run the full pipeline for one instrument and deliver the result.
pub async fn analyze_and_deliver(
    ctx: &AnalysisContext,
    instrument: Instrument,
) -> Result<(), ApiError> {
    let analysis = build_report(ctx, instrument).await;
    let message = report::format_report(&analysis);

    ctx.telegram.send_message(&message).await?;
    match analysis.chart_png {
        Some(png) => ctx.telegram.send_photo(png).await?,
        None => ctx.telegram.send_message("(No chart available)").await?,
    }

    info!(
        "✅ Delivered {} analysis at {}",
        analysis.instrument.symbol,
        analysis.generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

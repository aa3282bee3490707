//! Price chart rendering.
//!
//! Best-effort visual aid: any failure (empty series, backend error, font
//! problems) yields `None` and the report is delivered without a chart.

use chrono::{DateTime, Utc};
use plotters::prelude::*;
use tracing::warn;

use crate::models::PricePoint;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 400;

const PRICE_COLOR: RGBColor = BLUE;
const SMA_COLOR: RGBColor = RGBColor(255, 165, 0);
const RSI_COLOR: RGBColor = GREEN;

/// Render a PNG of price over time with optional SMA and RSI overlays.
///
/// The RSI is drawn on a secondary [0, 100] axis with guide lines at the
/// 70 (overbought) and 30 (oversold) thresholds.
pub fn render(
    points: &[PricePoint],
    sma: &[(DateTime<Utc>, f64)],
    rsi: &[(DateTime<Utc>, f64)],
    label: &str,
    days: u32,
) -> Option<Vec<u8>> {
    if points.len() < 2 {
        return None;
    }
    match draw(points, sma, rsi, label, days) {
        Ok(png) => Some(png),
        Err(e) => {
            warn!("Chart rendering failed for {}: {}", label, e);
            None
        }
    }
}

fn draw(
    points: &[PricePoint],
    sma: &[(DateTime<Utc>, f64)],
    rsi: &[(DateTime<Utc>, f64)],
    label: &str,
    days: u32,
) -> Result<Vec<u8>, String> {
    // BitMapBackend wants a file path; render to a temp file and read it back
    let temp_file = format!(
        "/tmp/cryptopulse_chart_{}.png",
        chrono::Utc::now().timestamp_millis()
    );

    {
        let backend = BitMapBackend::new(&temp_file, (WIDTH, HEIGHT));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| format!("Failed to fill canvas: {}", e))?;

        let min_price = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
        let max_price = points
            .iter()
            .map(|p| p.price)
            .fold(f64::NEG_INFINITY, f64::max);

        // Pad the price range; guard the degenerate flat-series case
        let price_range = (max_price - min_price).max(1e-8);
        let padding = price_range * 0.1;
        let y_min = (min_price - padding).max(0.0);
        let y_max = max_price + padding;

        let x_min = points[0].timestamp;
        let x_max = points[points.len() - 1].timestamp;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} - last {}h", label, days * 24),
                ("sans-serif", 30.0).into_font(),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .right_y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| format!("Failed to build chart: {}", e))?
            .set_secondary_coord(x_min..x_max, 0.0..100.0);

        chart
            .configure_mesh()
            .y_desc("USD")
            .x_desc("Time")
            .draw()
            .map_err(|e| format!("Failed to draw mesh: {}", e))?;

        chart
            .configure_secondary_axes()
            .y_desc("RSI14")
            .draw()
            .map_err(|e| format!("Failed to draw secondary axis: {}", e))?;

        chart
            .draw_series(LineSeries::new(
                points.iter().map(|p| (p.timestamp, p.price)),
                &PRICE_COLOR,
            ))
            .map_err(|e| format!("Failed to draw price line: {}", e))?
            .label("Price")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PRICE_COLOR));

        if !sma.is_empty() {
            chart
                .draw_series(LineSeries::new(sma.iter().copied(), &SMA_COLOR))
                .map_err(|e| format!("Failed to draw SMA line: {}", e))?
                .label("SMA20")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SMA_COLOR));
        }

        if !rsi.is_empty() {
            chart
                .draw_secondary_series(LineSeries::new(
                    rsi.iter().copied(),
                    &RSI_COLOR.mix(0.5),
                ))
                .map_err(|e| format!("Failed to draw RSI line: {}", e))?;

            // Overbought / oversold guides
            for (level, color) in [(70.0, RED), (30.0, MAGENTA)] {
                chart
                    .draw_secondary_series(std::iter::once(PathElement::new(
                        vec![(x_min, level), (x_max, level)],
                        color.mix(0.4),
                    )))
                    .map_err(|e| format!("Failed to draw RSI guide: {}", e))?;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()
            .map_err(|e| format!("Failed to draw legend: {}", e))?;

        root.present()
            .map_err(|e| format!("Failed to render chart: {}", e))?;
    }

    let image_data =
        std::fs::read(&temp_file).map_err(|e| format!("Failed to read chart file: {}", e))?;
    let _ = std::fs::remove_file(&temp_file);

    Ok(image_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_series_yields_none() {
        assert!(render(&[], &[], &[], "BTC", 3).is_none());

        let single = [PricePoint {
            timestamp: Utc::now(),
            price: 100.0,
        }];
        assert!(render(&single, &[], &[], "BTC", 3).is_none());
    }
}

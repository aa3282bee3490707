//! Hour-aligned scheduling loop.
//!
//! One long-lived task drives the whole service: check the active window,
//! analyze every tracked instrument sequentially, then sleep until the next
//! hour boundary. "Now" is re-sampled after the analysis pass so a slow pass
//! shifts the sleep, not the schedule; drift is self-correcting rather than
//! cumulative.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use tracing::{error, info, warn};

use crate::models::TRACKED;
use crate::services::analysis::{self, AnalysisContext};

/// Civil timezone that defines the daily active window.
pub const ANALYSIS_TZ: Tz = chrono_tz::America::Bogota;

/// Offset past the top of the hour for each tick.
const TICK_OFFSET_SECS: u32 = 5;

/// Sleep floor, guarding against a near-zero or negative interval when an
/// analysis pass overruns into the next boundary.
const MIN_SLEEP: Duration = Duration::from_secs(60);

/// Upper bound on one instrument's whole pipeline, so a pathological
/// provider chain cannot materially delay the next tick.
const INSTRUMENT_DEADLINE: Duration = Duration::from_secs(120);

const STARTUP_MESSAGE: &str = "🤖 Crypto bot started (educational). \
Hourly analysis between 06:00 and 21:30 America/Bogota.";

/// Whether a wall-clock time falls inside the daily analysis window.
///
/// The window is [06:00:00, 21:30:00], inclusive of both bounds; it closes
/// at 21:30:00 sharp, so 21:30:59 is already outside.
pub fn in_active_window(t: NaiveTime) -> bool {
    let open = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
    let close = NaiveTime::from_hms_opt(21, 30, 0).unwrap();
    t >= open && t <= close
}

/// The next hour boundary plus the tick offset.
fn next_tick(now: DateTime<Tz>) -> DateTime<Tz> {
    let base = now + chrono::Duration::hours(1);
    base.with_minute(0)
        .and_then(|t| t.with_second(TICK_OFFSET_SECS))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(base)
}

/// How long to sleep from `now` until the next tick, floored at [`MIN_SLEEP`].
pub fn sleep_until_next_tick(now: DateTime<Tz>) -> Duration {
    let delta = next_tick(now) - now;
    delta.to_std().unwrap_or(Duration::ZERO).max(MIN_SLEEP)
}

/// Run the scheduling loop for the lifetime of the process.
///
/// Spawned exactly once at startup; cancellation (process shutdown) aborts
/// it at whatever suspension point it is in.
pub async fn run(ctx: Arc<AnalysisContext>) {
    // One-time startup announcement; never fatal
    if let Err(e) = ctx.telegram.send_message(STARTUP_MESSAGE).await {
        warn!("Startup announcement failed: {}", e);
    }

    loop {
        let now = Utc::now().with_timezone(&ANALYSIS_TZ);
        if in_active_window(now.time()) {
            for instrument in TRACKED {
                match tokio::time::timeout(
                    INSTRUMENT_DEADLINE,
                    analysis::analyze_and_deliver(&ctx, instrument),
                )
                .await
                {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        error!("❌ Analysis failed for {}: {}", instrument.id, e);
                    }
                    Err(_) => {
                        error!(
                            "❌ Analysis for {} exceeded the {}s deadline",
                            instrument.id,
                            INSTRUMENT_DEADLINE.as_secs()
                        );
                    }
                }
            }
        } else {
            info!("Outside active window, skipping analysis pass");
        }

        // Re-sample after the pass so a long one shifts sleep, not schedule
        let after = Utc::now().with_timezone(&ANALYSIS_TZ);
        tokio::time::sleep(sleep_until_next_tick(after)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bogota(h: u32, m: u32, s: u32) -> DateTime<Tz> {
        ANALYSIS_TZ.with_ymd_and_hms(2024, 3, 5, h, m, s).unwrap()
    }

    #[test]
    fn window_bounds_are_second_precise() {
        assert!(!in_active_window(bogota(5, 59, 0).time()));
        assert!(!in_active_window(bogota(5, 59, 59).time()));
        assert!(in_active_window(bogota(6, 0, 0).time()));
        assert!(in_active_window(bogota(12, 0, 0).time()));
        assert!(in_active_window(bogota(21, 29, 59).time()));
        assert!(in_active_window(bogota(21, 30, 0).time()));
        assert!(!in_active_window(bogota(21, 30, 59).time()));
        assert!(!in_active_window(bogota(21, 31, 0).time()));
        assert!(!in_active_window(bogota(23, 0, 0).time()));
    }

    #[test]
    fn sleep_targets_next_hour_boundary_plus_offset() {
        // 10:20:00 -> 11:00:05 is 2405s away
        assert_eq!(
            sleep_until_next_tick(bogota(10, 20, 0)),
            Duration::from_secs(2405)
        );
        // Exactly on a tick: the full hour to the next one
        assert_eq!(
            sleep_until_next_tick(bogota(10, 0, 5)),
            Duration::from_secs(3600)
        );
    }

    #[test]
    fn sleep_is_floored_near_the_boundary() {
        // 10:59:30 -> 11:00:05 is only 35s away; clamped to the floor
        assert_eq!(sleep_until_next_tick(bogota(10, 59, 30)), MIN_SLEEP);
        // Right on the boundary top, offset already passed this second
        assert_eq!(sleep_until_next_tick(bogota(10, 59, 59)), MIN_SLEEP);
    }

    #[test]
    fn overrun_past_the_boundary_targets_the_following_hour() {
        // A pass finishing just after 11:00 schedules 12:00:05, not a
        // zero-length sleep to the already-missed 11:00:05 tick
        assert_eq!(
            sleep_until_next_tick(bogota(11, 0, 3)),
            Duration::from_secs(3602)
        );
    }
}

//! Data models shared across services
//!
//! Everything here is transient: rebuilt each scheduling tick per instrument
//! and discarded after the report is delivered. No entity persists across ticks.

pub mod instrument;
pub mod market;
pub mod news;
pub mod report;

// Re-export commonly used types for convenience
pub use instrument::{Instrument, TRACKED};
pub use market::{OrderBookSnapshot, PricePoint};
pub use news::NewsItem;
pub use report::{AnalysisReport, RsiState, SuggestedLevels, Trend};

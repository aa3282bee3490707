pub mod format;

pub use format::{format_qty, format_usd};

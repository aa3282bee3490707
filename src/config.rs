//! Environment-supplied configuration.
//!
//! Read once at startup into an explicit struct; missing or malformed
//! required values fail fast before the scheduling loop begins. The two
//! news keys are optional: absence of both degrades the news client to its
//! "no relevant news" result.

use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot credential
    pub telegram_token: String,
    /// Destination chat for all reports
    pub chat_id: i64,
    pub news_api_key: Option<String>,
    pub gnews_api_key: Option<String>,
    /// Liveness endpoint bind address
    pub bind: String,
    pub port: u16,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let telegram_token = require("TOKEN")?;
        let chat_id = require("CHAT_ID")?
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::Invalid("CHAT_ID", e.to_string()))?;

        Ok(Self {
            telegram_token,
            chat_id,
            news_api_key: optional("NEWS_API_KEY"),
            gnews_api_key: optional("GNEWS_API_KEY"),
            bind: optional("BIND").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match optional("PORT") {
                Some(raw) => raw
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        ConfigError::Invalid("PORT", e.to_string())
                    })?,
                None => 8000,
            },
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

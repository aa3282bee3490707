use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use serde_json::json;

use super::ApiError;

/// Telegram Bot API client bound to a fixed destination chat.
#[derive(Clone)]
pub struct TelegramClient {
    http_client: HttpClient,
    token: String,
    chat_id: i64,
    base_url: String,
}

impl TelegramClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.telegram.org";

    pub fn new(token: String, chat_id: i64) -> Self {
        Self {
            http_client: super::http_client(),
            token,
            chat_id,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing)
    #[allow(dead_code)]
    pub fn with_base_url(token: String, chat_id: i64, base_url: String) -> Self {
        Self {
            http_client: super::http_client(),
            token,
            chat_id,
            base_url,
        }
    }

    /// POST /sendMessage with Markdown formatting.
    pub async fn send_message(&self, text: &str) -> Result<(), ApiError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let response = self
            .http_client
            .post(&url)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "Markdown",
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }

    /// POST /sendPhoto with an in-memory PNG.
    pub async fn send_photo(&self, png: Vec<u8>) -> Result<(), ApiError> {
        let url = format!("{}/bot{}/sendPhoto", self.base_url, self.token);
        let photo = Part::bytes(png)
            .file_name("chart.png")
            .mime_str("image/png")?;
        let form = Form::new()
            .text("chat_id", self.chat_id.to_string())
            .part("photo", photo);

        let response = self.http_client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }
}

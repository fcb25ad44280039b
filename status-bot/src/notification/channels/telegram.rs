//! Telegram Bot API notification channel.
//!
//! Sends plain-text messages via `POST /bot<token>/sendMessage`. A 429
//! response is surfaced as [`DeliveryError::RateLimited`] together with the
//! `parameters.retry_after` hint; it is not retried here.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tracing::{debug, error, info};

use super::NotificationChannel;
use crate::notification::DeliveryError;

/// Public Telegram Bot API.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram `sendMessage` text limit (UTF-8 characters).
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

const CHANNEL_TYPE: &str = "telegram";

/// Telegram channel configuration.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Telegram Bot API token.
    pub bot_token: String,
    /// Target chat ID (user, group, or channel).
    pub chat_id: String,
    /// Bot API base URL, without trailing slash.
    pub api_base: String,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Telegram notification channel.
#[derive(Debug)]
pub struct TelegramChannel {
    config: TelegramConfig,
    client: Client,
}

impl TelegramChannel {
    pub fn new(config: TelegramConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base, self.config.bot_token
        )
    }
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    fn channel_type(&self) -> &'static str {
        CHANNEL_TYPE
    }

    async fn send(&self, message: &str) -> Result<(), DeliveryError> {
        let payload = json!({
            "chat_id": self.config.chat_id,
            "text": truncate_message(message, TELEGRAM_MESSAGE_LIMIT),
        });

        debug!(chat_id = %self.config.chat_id, "Sending Telegram message");

        // The request URL embeds the bot token, so it is stripped from errors.
        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let source = e.without_url();
                error!(error = %source, "Telegram request failed");
                DeliveryError::Transport {
                    channel: CHANNEL_TYPE,
                    source,
                }
            })?;

        let status = response.status();
        if status.is_success() {
            info!(chat_id = %self.config.chat_id, "Telegram message sent");
            return Ok(());
        }

        let body: Value = response.json().await.unwrap_or_default();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = body
                .get("parameters")
                .and_then(|p| p.get("retry_after"))
                .and_then(|v| v.as_u64())
                .map(Duration::from_secs);

            error!(?retry_after, "Telegram rate limited (429)");
            return Err(DeliveryError::RateLimited {
                channel: CHANNEL_TYPE,
                retry_after,
            });
        }

        let description = body
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or("no description")
            .to_string();

        error!(status = status.as_u16(), %description, "Telegram sendMessage failed");
        Err(DeliveryError::Rejected {
            channel: CHANNEL_TYPE,
            status,
            description,
        })
    }
}

/// Truncate a message to fit within the Telegram character limit.
fn truncate_message(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let suffix = "\n\n[truncated]";
    let budget = limit - suffix.len();
    let truncated: String = text.chars().take(budget).collect();
    format!("{truncated}{suffix}")
}

//! Notification channels.

mod telegram;

pub use telegram::{DEFAULT_TELEGRAM_API_BASE, TelegramChannel, TelegramConfig};

use async_trait::async_trait;

use super::DeliveryError;

/// Trait for notification channels.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Get the channel type name.
    fn channel_type(&self) -> &'static str;

    /// Deliver `message` once. Implementations must not retry or queue.
    async fn send(&self, message: &str) -> Result<(), DeliveryError>;
}

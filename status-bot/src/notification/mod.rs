//! Message delivery.
//!
//! A [`NotificationChannel`] delivers plain-text messages to the operator.
//! Each `send` makes a single delivery attempt; whether to try again is up
//! to the caller.

pub mod channels;

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

pub use channels::{NotificationChannel, TelegramChannel, TelegramConfig};

/// A message could not be delivered.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("{channel} request failed: {source}")]
    Transport {
        channel: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{channel} rate limit exceeded{}", retry_hint(.retry_after))]
    RateLimited {
        channel: &'static str,
        retry_after: Option<Duration>,
    },

    #[error("{channel} rejected the message: {status} - {description}")]
    Rejected {
        channel: &'static str,
        status: StatusCode,
        description: String,
    },
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(wait) => format!(", retry after {}s", wait.as_secs()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_display() {
        let err = DeliveryError::RateLimited {
            channel: "telegram",
            retry_after: Some(Duration::from_secs(7)),
        };
        assert_eq!(err.to_string(), "telegram rate limit exceeded, retry after 7s");

        let err = DeliveryError::RateLimited {
            channel: "telegram",
            retry_after: None,
        };
        assert_eq!(err.to_string(), "telegram rate limit exceeded");
    }
}

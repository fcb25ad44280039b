//! Runtime configuration read from the process environment.
//!
//! Credentials are mandatory and checked once at startup. Everything else
//! has a default and can be overridden through environment variables.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use homework_api::DEFAULT_ENDPOINT;
use url::Url;

use crate::notification::channels::DEFAULT_TELEGRAM_API_BASE;
use crate::{Error, Result};

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

pub const HOMEWORK_API_ENDPOINT: &str = "HOMEWORK_API_ENDPOINT";
pub const RETRY_INTERVAL_SECS: &str = "RETRY_INTERVAL_SECS";
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const TELEGRAM_API_BASE: &str = "TELEGRAM_API_BASE";
pub const LOG_DIR: &str = "LOG_DIR";

/// Pause between two polls.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(600);

pub const DEFAULT_LOG_DIR: &str = "logs";

/// Secrets the bot cannot run without.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through `lookup`. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| {
                    missing.push(key);
                    String::new()
                })
        };

        let practicum_token = require(PRACTICUM_TOKEN);
        let telegram_token = require(TELEGRAM_TOKEN);
        let telegram_chat_id = require(TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(Error::ConfigMissing(missing));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Optional knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Homework status endpoint.
    pub endpoint: Url,
    /// Fixed sleep after every iteration, successful or not.
    pub retry_interval: Duration,
    /// HTTP request timeout. Zero leaves the transport default in place.
    pub request_timeout: Duration,
    /// Telegram Bot API base URL.
    pub telegram_api_base: String,
    /// Directory for log files.
    pub log_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("DEFAULT_ENDPOINT is a valid URL"),
            retry_interval: DEFAULT_RETRY_INTERVAL,
            request_timeout: Duration::ZERO,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut settings = Self::default();

        if let Some(raw) = get(HOMEWORK_API_ENDPOINT) {
            settings.endpoint = Url::parse(raw.trim())
                .map_err(|e| Error::config(format!("{HOMEWORK_API_ENDPOINT} is not a valid URL: {e}")))?;
        }

        if let Some(secs) = parse_secs(RETRY_INTERVAL_SECS, get(RETRY_INTERVAL_SECS))? {
            if secs == 0 {
                return Err(Error::config(format!(
                    "{RETRY_INTERVAL_SECS} must be greater than zero"
                )));
            }
            settings.retry_interval = Duration::from_secs(secs);
        }

        if let Some(secs) = parse_secs(REQUEST_TIMEOUT_SECS, get(REQUEST_TIMEOUT_SECS))? {
            settings.request_timeout = Duration::from_secs(secs);
        }

        if let Some(base) = get(TELEGRAM_API_BASE) {
            Url::parse(base.trim())
                .map_err(|e| Error::config(format!("{TELEGRAM_API_BASE} is not a valid URL: {e}")))?;
            settings.telegram_api_base = base.trim().trim_end_matches('/').to_string();
        }

        settings.log_dir = log_dir_from_lookup(&lookup);

        Ok(settings)
    }
}

/// Log directory, readable before the rest of [`Settings`] so that settings
/// errors can be logged.
pub fn log_dir_from_env() -> PathBuf {
    log_dir_from_lookup(|key| std::env::var(key).ok())
}

pub fn log_dir_from_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(LOG_DIR)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

fn parse_secs(key: &str, raw: Option<String>) -> Result<Option<u64>> {
    raw.map(|value| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|e| Error::config(format!("{key} must be a whole number of seconds: {e}")))
    })
    .transpose()
}

/// Everything the bot needs, built once at startup and passed down by reference.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub credentials: Credentials,
    pub settings: Settings,
}

impl BotConfig {
    pub fn new(credentials: Credentials, settings: Settings) -> Self {
        Self {
            credentials,
            settings,
        }
    }
}

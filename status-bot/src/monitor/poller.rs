//! The poll loop.
//!
//! Each iteration fetches statuses newer than the cursor, validates the
//! response, turns the first record into a message and sends it. Any stage
//! failure is logged, reported through the same notifier, and followed by
//! the regular sleep. The loop itself never ends.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use homework_api::{ApiError, CurrentDate, HomeworkApiClient, RawResponse, validate};
use tracing::{debug, error, info, warn};

use super::extractor::extract;
use crate::config::BotConfig;
use crate::error::PollError;
use crate::notification::{NotificationChannel, TelegramChannel, TelegramConfig};
use crate::utils::http_client;

/// Prefix of the message sent to the operator when an iteration fails.
pub const FAILURE_MESSAGE_PREFIX: &str = "Сбой в работе программы";

/// Source of homework status responses.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, from_date: i64) -> Result<RawResponse, ApiError>;
}

#[async_trait]
impl StatusSource for HomeworkApiClient {
    async fn fetch(&self, from_date: i64) -> Result<RawResponse, ApiError> {
        HomeworkApiClient::fetch(self, from_date).await
    }
}

/// Result of an iteration that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A status change was found and delivered.
    Notified { message: String },
    /// The response carried no records.
    NoChange,
}

/// Drives the poll loop. Owns the cursor.
pub struct Poller<S, N> {
    source: S,
    notifier: N,
    cursor: i64,
    retry_interval: Duration,
}

impl Poller<HomeworkApiClient, TelegramChannel> {
    /// Wire the production API client and Telegram channel from `config`.
    pub fn from_config(config: &BotConfig) -> crate::Result<Self> {
        let client = http_client::build_client(config.settings.request_timeout)?;

        let source = HomeworkApiClient::new(
            client.clone(),
            config.settings.endpoint.clone(),
            config.credentials.practicum_token.clone(),
        );
        let notifier = TelegramChannel::new(
            TelegramConfig::new(
                config.credentials.telegram_token.clone(),
                config.credentials.telegram_chat_id.clone(),
            )
            .with_api_base(config.settings.telegram_api_base.clone()),
            client,
        );

        Ok(Self::new(source, notifier, config.settings.retry_interval))
    }
}

impl<S, N> Poller<S, N>
where
    S: StatusSource,
    N: NotificationChannel,
{
    /// Create a poller whose cursor starts at the current time.
    pub fn new(source: S, notifier: N, retry_interval: Duration) -> Self {
        Self {
            source,
            notifier,
            cursor: Utc::now().timestamp(),
            retry_interval,
        }
    }

    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Run forever: one iteration, then the fixed sleep, whatever the outcome.
    pub async fn run(mut self) {
        info!(
            cursor = self.cursor,
            interval_secs = self.retry_interval.as_secs(),
            notifier = self.notifier.channel_type(),
            "Homework status poller started"
        );

        loop {
            self.run_iteration().await;
            tokio::time::sleep(self.retry_interval).await;
        }
    }

    /// One iteration including failure reporting. Never fails.
    pub async fn run_iteration(&mut self) {
        match self.poll_once().await {
            Ok(PollOutcome::Notified { .. }) => debug!(cursor = self.cursor, "Iteration finished"),
            Ok(PollOutcome::NoChange) => debug!(cursor = self.cursor, "Iteration finished, nothing to report"),
            Err(e) => self.report_failure(&e).await,
        }
    }

    /// One pass of fetch, validate, extract and notify.
    pub async fn poll_once(&mut self) -> Result<PollOutcome, PollError> {
        let response = self.source.fetch(self.cursor).await?;
        self.advance_cursor(&response);

        let records = validate(&response)?;
        let Some(record) = records.first() else {
            info!(cursor = self.cursor, "No homework status changes");
            return Ok(PollOutcome::NoChange);
        };

        if records.len() > 1 {
            // Only the first record is reported per iteration.
            warn!(
                ignored = records.len() - 1,
                "Response holds several homework records, reporting only the first"
            );
        }

        let message = extract(record)?;
        self.notifier.send(&message).await?;

        info!(%message, "Homework status changed");
        Ok(PollOutcome::Notified { message })
    }

    fn advance_cursor(&mut self, response: &RawResponse) {
        match response.current_date() {
            CurrentDate::Timestamp(ts) => {
                debug!(from = self.cursor, to = ts, "Advancing cursor");
                self.cursor = ts;
            }
            CurrentDate::Absent => {
                debug!(cursor = self.cursor, "Response has no current_date, keeping cursor");
            }
            CurrentDate::Invalid(value) => {
                warn!(%value, cursor = self.cursor, "Ignoring non-integer current_date");
            }
        }
    }

    async fn report_failure(&self, failure: &PollError) {
        error!(kind = failure.kind(), error = %failure, "Poll iteration failed");

        let message = format!("{FAILURE_MESSAGE_PREFIX}: {failure}");
        if let Err(e) = self.notifier.send(&message).await {
            error!(error = %e, "Failed to deliver failure report");
        }
    }
}

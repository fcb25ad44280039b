//! HTTP client for the homework status endpoint.

use std::fmt;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use tracing::{debug, error};
use url::Url;

use crate::error::ApiError;
use crate::models::StatusQuery;
use crate::response::RawResponse;

/// Production homework status endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Issues status queries against the homework API.
///
/// The client makes exactly one request per [`fetch`](Self::fetch) call.
/// Retrying is left to the caller.
#[derive(Clone)]
pub struct HomeworkApiClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl HomeworkApiClient {
    pub fn new(client: Client, endpoint: Url, token: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            token: token.into(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Query homework statuses changed since `from_date` (unix seconds).
    pub async fn fetch(&self, from_date: i64) -> Result<RawResponse, ApiError> {
        let query = StatusQuery { from_date };
        debug!(endpoint = %self.endpoint, from_date, "Sending homework status request");

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "Homework status endpoint is unavailable"
            );
            return Err(ApiError::UpstreamUnavailable {
                status,
                endpoint: self.endpoint.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            error!(endpoint = %self.endpoint, error = %e, "API response is not valid JSON");
            ApiError::MalformedPayload(e)
        })?;

        Ok(RawResponse::new(value))
    }

    fn transport_error(&self, source: reqwest::Error) -> ApiError {
        error!(endpoint = %self.endpoint, error = %source, "Homework status request failed");
        ApiError::Transport {
            endpoint: self.endpoint.to_string(),
            source,
        }
    }
}

impl fmt::Debug for HomeworkApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomeworkApiClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

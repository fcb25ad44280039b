use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single status query.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response was obtained (DNS, connect, timeout, reset), or the
    /// connection dropped while the body was being read.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// A response arrived with a status other than 200.
    #[error("endpoint {endpoint} is unavailable, API response status: {status}")]
    UpstreamUnavailable { status: StatusCode, endpoint: String },
    /// The body could not be decoded as JSON.
    #[error("API response is not valid JSON: {0}")]
    MalformedPayload(#[source] serde_json::Error),
}

/// The decoded response does not have the shape the pipeline relies on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("API response is not a JSON object (found {found})")]
    NotAMapping { found: &'static str },
    #[error("API response has no \"homeworks\" key")]
    MissingHomeworks,
    #[error("\"homeworks\" is not a list (found {found})")]
    NotASequence { found: &'static str },
}

//! Application-wide error types.

use std::path::{Path, PathBuf};

use homework_api::{ApiError, ShapeError};
use thiserror::Error;

use crate::monitor::ExtractError;
use crate::notification::DeliveryError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Startup and plumbing errors. These are fatal; the poll loop never sees them.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required environment variable(s): {}", .0.join(", "))]
    ConfigMissing(Vec<&'static str>),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error while {op} {}: {source}", .path.display())]
    IoPath {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn io_path(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::IoPath {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Failure of a single poll iteration, tagged by the stage that produced it.
///
/// Every variant is recoverable: the poller reports it and tries again after
/// the regular interval.
#[derive(Error, Debug)]
pub enum PollError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl PollError {
    /// Short classification used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Api(ApiError::Transport { .. }) => "TransportError",
            Self::Api(ApiError::UpstreamUnavailable { .. }) => "UpstreamUnavailable",
            Self::Api(ApiError::MalformedPayload(_)) => "MalformedPayload",
            Self::Shape(_) => "ShapeError",
            Self::Extract(ExtractError::MissingField(_)) => "MissingField",
            Self::Extract(ExtractError::UnknownStatus(_)) => "UnknownStatus",
            Self::Delivery(_) => "DeliveryError",
        }
    }
}

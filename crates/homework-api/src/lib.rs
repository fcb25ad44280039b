//! Client for the Practicum homework status API.
//!
//! The crate covers the upstream half of the status pipeline:
//!
//! - [`HomeworkApiClient`] issues `GET <endpoint>?from_date=<cursor>` and
//!   classifies transport, HTTP and decoding failures into [`ApiError`].
//! - [`validate`] checks the shape of a decoded [`RawResponse`] and yields
//!   the [`HomeworkRecord`]s it carries, or a [`ShapeError`].

pub mod client;
pub mod error;
pub mod models;
pub mod response;

pub use client::{DEFAULT_ENDPOINT, HomeworkApiClient};
pub use error::{ApiError, ShapeError};
pub use models::{HomeworkRecord, HomeworkStatus, StatusQuery};
pub use response::{CurrentDate, RawResponse, validate};

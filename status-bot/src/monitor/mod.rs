//! Homework status monitoring.
//!
//! - [`verdict`]: fixed verdict text per known status.
//! - [`extractor`]: turns a validated record into a notification message.
//! - [`poller`]: the poll / validate / extract / notify loop.

pub mod extractor;
pub mod poller;
pub mod verdict;

pub use extractor::{ExtractError, extract};
pub use poller::{FAILURE_MESSAGE_PREFIX, PollOutcome, Poller, StatusSource};
pub use verdict::verdict;

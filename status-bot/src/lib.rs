//! status-bot library crate.
//!
//! Polls the homework status API on a fixed interval and reports review
//! status changes, and its own failures, to a Telegram chat.

pub mod config;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod notification;
pub mod utils;

pub use error::{Error, PollError, Result};

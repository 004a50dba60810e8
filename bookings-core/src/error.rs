//! Error types for the bookings derivation layer.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while loading or deriving booking data.
#[derive(Error, Debug)]
pub enum BookingsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown booking status filter '{0}'")]
    UnknownStatus(String),

    #[error("Unknown time zone '{0}'")]
    InvalidTimezone(String),

    #[error("Recurrence error: {0}")]
    Recurrence(String),

    #[error("Query failed: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BookingsError {
    fn from(e: serde_json::Error) -> Self {
        BookingsError::Serialization(e.to_string())
    }
}

/// Result type alias for bookings operations.
pub type BookingsResult<T> = Result<T, BookingsError>;

/// Reasons an occurrence could not be turned into a calendar export.
///
/// Never fatal: callers drop the "add to calendar" affordance instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    #[error("Duration must be a positive number of minutes, got {0}")]
    NonPositiveDuration(i64),

    #[error("Event title is empty")]
    EmptyTitle,

    #[error("Start time {0} cannot be represented")]
    StartOutOfRange(DateTime<Utc>),

    #[error("Event starting {start} and lasting {duration_minutes} minutes ends out of range")]
    EndOutOfRange {
        start: DateTime<Utc>,
        duration_minutes: i64,
    },

    #[error("Invalid recurrence rule '{rule}': {reason}")]
    InvalidRecurrenceRule { rule: String, reason: String },
}

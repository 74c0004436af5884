//! Error types for calendar construction and business day calculation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::scheduling::INPUT_FORMAT;

/// Result type for calendar operations.
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Errors that can occur when computing holidays or counting business days.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// Input text is not a valid calendar date in the expected format.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// An argument is outside its permitted domain, e.g. a negative business day count.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A computed date cannot be represented.
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    /// The stepper exceeded its iteration cap before collecting enough business days.
    #[error(
        "Business day calculation did not converge: found fewer than {count} business days \
         from {start} within {iterations} calendar days"
    )]
    DidNotConverge {
        start: NaiveDate,
        count: i32,
        iterations: u32,
    },

    /// The stepper returned fewer dates than requested.
    #[error("Could not compute the full range of business days: {computed} of {requested}")]
    InsufficientBusinessDays { requested: usize, computed: usize },

    /// Settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalendarError {
    /// Returns whether the error originates from user input rather than an internal failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CalendarError::InvalidDate(_) | CalendarError::InvalidArgument(_)
        )
    }

    /// Return the message shown to a user when a calculation fails.
    pub fn user_message(&self) -> String {
        match self {
            CalendarError::InvalidDate(_) => {
                format!("Please enter a valid date in {} format.", INPUT_FORMAT)
            }
            CalendarError::DidNotConverge { .. }
            | CalendarError::InsufficientBusinessDays { .. } => {
                "Could not compute the full range of business days.".to_string()
            }
            other => other.to_string(),
        }
    }
}

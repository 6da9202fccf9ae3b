//! Error types for availability checks.

use chrono::NaiveDate;
use thiserror::Error;

use crate::date_range::DateRange;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Invalid date '{0}': expected a calendar date in YYYY-MM-DD format")]
    InvalidDate(String),

    #[error("Invalid date range: end_date {end} must be after start_date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Dates {candidate} are outside property availability range {window}")]
    OutOfWindow {
        candidate: DateRange,
        window: DateRange,
    },

    /// The candidate collides with another booking of the same property.
    /// The message never names the other booking.
    #[error("Dates {candidate} overlap with an existing booking")]
    Overlap { candidate: DateRange },
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;

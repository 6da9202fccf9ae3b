//! Error types for ledger operations.

use stay_engine::{AvailabilityError, BookingId};
use thiserror::Error;

use crate::model::PropertyId;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Property not found: {0}")]
    PropertyNotFound(PropertyId),

    #[error("Booking not found: {0}")]
    BookingNotFound(BookingId),

    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    #[error("Duplicate property id in ledger snapshot: {0}")]
    DuplicateProperty(PropertyId),

    #[error("Duplicate booking id in ledger snapshot: {0}")]
    DuplicateBooking(BookingId),

    #[error("Invalid ledger snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

//! # stay-ledger
//!
//! Property and booking storage for the availability engine.
//!
//! The [`Ledger`] is the write path of the booking workflow. It looks up a
//! property's availability window and bookings, asks `stay-engine` whether a
//! stay fits, and persists the result while still holding the property's
//! lock. The engine alone never guarantees that two overlapping requests
//! cannot both be accepted; the ledger does.
//!
//! ## Modules
//!
//! - [`model`] — Property, booking and request records
//! - [`ledger`] — The concurrent in-memory ledger and booking workflow
//! - [`snapshot`] — JSON snapshot load/save
//! - [`error`] — Error types

pub mod error;
pub mod ledger;
pub mod model;
pub mod snapshot;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use model::{
    Booking, BookingUpdate, NewBooking, NewProperty, Property, PropertyFilter, PropertyId,
};
pub use snapshot::LedgerSnapshot;
pub use stay_engine::{BookingId, DateRange};

//! Property and booking records held by the ledger.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stay_engine::{BookedRange, BookingId, DateRange};

/// Identifier of a rental property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub u64);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable property and the outer bound of its bookable dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub availability_window: DateRange,
}

/// A stay at one property. `range` is replaced, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub property_id: PropertyId,
    pub guest_name: String,
    pub range: DateRange,
}

impl Booking {
    /// The id/dates pair the availability engine works with.
    pub fn booked_range(&self) -> BookedRange {
        BookedRange {
            id: self.id,
            range: self.range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub availability_window: DateRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub property_id: PropertyId,
    pub guest_name: String,
    pub range: DateRange,
}

/// Partial update of a booking. Missing dates keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingUpdate {
    pub guest_name: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl BookingUpdate {
    pub fn changes_dates(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

/// Filters for [`crate::Ledger::list_properties`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropertyFilter {
    /// Keep properties whose window opens on or before this date.
    pub available_from: Option<NaiveDate>,
    /// Keep properties whose window closes on or after this date.
    pub available_to: Option<NaiveDate>,
}

impl PropertyFilter {
    pub fn matches(&self, property: &Property) -> bool {
        let window = property.availability_window;
        self.available_from.is_none_or(|from| window.start() <= from)
            && self.available_to.is_none_or(|to| window.end() >= to)
    }
}

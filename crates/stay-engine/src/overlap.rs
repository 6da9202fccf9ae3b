//! Detect bookings that collide with a candidate date range.
//!
//! Linear scan over the property's existing bookings. The input does not need
//! to be sorted. Boundaries are inclusive: a booking ending on the day another
//! starts is a conflict.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;

/// Identifier of a persisted booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An existing booking as seen by the engine: its id and its dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedRange {
    pub id: BookingId,
    pub range: DateRange,
}

/// A detected collision between the candidate and one existing booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub booking: BookedRange,
    pub shared_days: i64,
}

/// Find every existing booking that overlaps `candidate`.
///
/// The booking whose id equals `exclude` is skipped, so an update is never
/// compared against its own previous dates. Results keep the input order.
pub fn find_overlaps(
    candidate: &DateRange,
    existing: &[BookedRange],
    exclude: Option<BookingId>,
) -> Vec<Overlap> {
    existing
        .iter()
        .filter(|booked| Some(booked.id) != exclude)
        .filter(|booked| candidate.overlaps(&booked.range))
        .map(|booked| Overlap {
            booking: *booked,
            shared_days: candidate.shared_days(&booked.range),
        })
        .collect()
}

/// Boolean form of [`find_overlaps`]; stops at the first collision.
pub fn has_overlap(
    candidate: &DateRange,
    existing: &[BookedRange],
    exclude: Option<BookingId>,
) -> bool {
    existing
        .iter()
        .any(|booked| Some(booked.id) != exclude && candidate.overlaps(&booked.range))
}

//! Booking validation and the availability calendar view.
//!
//! These are the two entry points consumed by the booking workflow. Both are
//! pure functions of their inputs: the caller supplies the property's window
//! and its bookings, and nothing here performs I/O or keeps state.
//!
//! A successful [`validate_booking`] is advisory. Whoever persists the booking
//! must run the check and the write as one atomic step per property, otherwise
//! two concurrent requests can both pass validation against the same stale
//! booking set.

use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::{AvailabilityError, Result};
use crate::free_ranges::{self, FreeRange};
use crate::overlap::{self, BookedRange, BookingId};
use crate::window;

/// Check a proposed booking against the property's window and bookings.
///
/// The window check always runs first, so a request that is both out of
/// window and overlapping reports `OutOfWindow`.
///
/// # Arguments
///
/// * `window` — The property's availability window.
/// * `existing` — The property's current bookings, in any order.
/// * `candidate` — The proposed dates.
/// * `exclude` — On update, the id of the booking being changed.
///
/// # Errors
/// `AvailabilityError::OutOfWindow` or `AvailabilityError::Overlap`.
pub fn validate_booking(
    window: &DateRange,
    existing: &[BookedRange],
    candidate: &DateRange,
    exclude: Option<BookingId>,
) -> Result<()> {
    window::check_within_window(window, candidate)?;

    if overlap::has_overlap(candidate, existing, exclude) {
        return Err(AvailabilityError::Overlap {
            candidate: *candidate,
        });
    }

    Ok(())
}

/// The maximal free ranges of `window`, in chronological order.
///
/// Read-only and idempotent. Never fails, even for bookings that already
/// violate the non-overlap invariant.
pub fn compute_free_ranges(window: &DateRange, bookings: &[DateRange]) -> Vec<FreeRange> {
    free_ranges::find_free_ranges(window, bookings)
}

/// Booked and free days of one property's availability window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityCalendar {
    /// The availability window analysed.
    pub window: DateRange,
    /// Bookings touching the window, sorted chronologically.
    pub booked: Vec<DateRange>,
    /// Free ranges between and around the bookings.
    pub free: Vec<FreeRange>,
}

impl AvailabilityCalendar {
    /// Total free days across all free ranges.
    pub fn free_days(&self) -> i64 {
        self.free.iter().map(|range| range.days).sum()
    }
}

/// Build the calendar view for a property's window.
pub fn availability_calendar(window: &DateRange, bookings: &[DateRange]) -> AvailabilityCalendar {
    AvailabilityCalendar {
        window: *window,
        booked: free_ranges::sorted_in_window(window, bookings),
        free: compute_free_ranges(window, bookings),
    }
}

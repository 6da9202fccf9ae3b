//! Compute the free date ranges of a property's availability window.
//!
//! Sorts bookings by start date, then sweeps a day cursor across the window,
//! emitting the gap before each booking and the tail after the last one. All
//! stepping is whole calendar days on `NaiveDate`, never time arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;

/// A maximal run of unbooked days, inclusive on both ends.
///
/// A single free day between two bookings has `start == end`, which a
/// [`DateRange`] cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

impl FreeRange {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            days: (end - start).num_days() + 1,
        }
    }
}

/// Bookings that touch the window, sorted by `(start, end)`.
pub(crate) fn sorted_in_window(window: &DateRange, bookings: &[DateRange]) -> Vec<DateRange> {
    let mut booked: Vec<DateRange> = bookings
        .iter()
        .filter(|range| range.overlaps(window))
        .copied()
        .collect();
    booked.sort();
    booked
}

/// Bookings in `booked` (sorted) that start on a day an earlier booking
/// already covers.
fn overlapping_in_sorted(booked: &[DateRange]) -> Vec<DateRange> {
    let mut overlapping = Vec::new();
    // Latest booked day among the bookings seen so far.
    let mut covered_until: Option<NaiveDate> = None;
    for range in booked {
        match covered_until {
            Some(until) if range.start() <= until => {
                overlapping.push(*range);
                covered_until = Some(until.max(range.end()));
            }
            Some(until) => covered_until = Some(until.max(range.end())),
            None => covered_until = Some(range.end()),
        }
    }
    overlapping
}

/// Bookings touching `window` that collide with an earlier-starting booking,
/// in sorted order. Empty for data that honours the non-overlap invariant.
pub fn find_overlapping_bookings(window: &DateRange, bookings: &[DateRange]) -> Vec<DateRange> {
    overlapping_in_sorted(&sorted_in_window(window, bookings))
}

/// Find the free ranges within `window`, given the property's bookings.
///
/// Bookings may arrive in any order. Bookings outside the window are ignored
/// and partially outside ones are clipped. Overlapping bookings violate the
/// per-property invariant; they are reported with a warning and swept in
/// sorted order without failing. Returns ranges in chronological order.
pub fn find_free_ranges(window: &DateRange, bookings: &[DateRange]) -> Vec<FreeRange> {
    let booked = sorted_in_window(window, bookings);

    let mut free = Vec::new();
    // `None` once the cursor would step past the last representable date.
    let mut cursor = Some(window.start());

    for range in overlapping_in_sorted(&booked) {
        tracing::warn!(
            booking = %range,
            "overlapping bookings in persisted data; computing best-effort free ranges"
        );
    }

    for range in &booked {
        let Some(at) = cursor else { break };
        if at < range.start() {
            if let Some(gap_end) = range.start().pred_opt() {
                free.push(FreeRange::new(at, gap_end));
            }
        }
        // Never move backwards: a booking nested inside an earlier one must
        // not reopen days that are already covered.
        cursor = range.end().succ_opt().map(|next| next.max(at));
    }

    if let Some(at) = cursor {
        if at <= window.end() {
            free.push(FreeRange::new(at, window.end()));
        }
    }

    free
}

/// Find the first free range of at least `min_days` days within the window.
///
/// Delegates to [`find_free_ranges`].
pub fn find_first_free_range(
    window: &DateRange,
    bookings: &[DateRange],
    min_days: i64,
) -> Option<FreeRange> {
    find_free_ranges(window, bookings)
        .into_iter()
        .find(|range| range.days >= min_days)
}

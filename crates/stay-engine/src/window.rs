//! Availability window containment check.

use crate::date_range::DateRange;
use crate::error::{AvailabilityError, Result};

/// Require `candidate` to lie fully inside the property's availability window:
/// `candidate.start >= window.start && candidate.end <= window.end`.
///
/// # Errors
/// Returns `AvailabilityError::OutOfWindow` otherwise.
pub fn check_within_window(window: &DateRange, candidate: &DateRange) -> Result<()> {
    if window.contains(candidate) {
        Ok(())
    } else {
        Err(AvailabilityError::OutOfWindow {
            candidate: *candidate,
            window: *window,
        })
    }
}

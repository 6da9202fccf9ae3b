//! # stay-engine
//!
//! Availability engine for short-term rental bookings.
//!
//! Decides whether a proposed stay fits a property's availability window
//! without colliding with an existing booking, and computes the free date
//! ranges left in the window. Everything works on whole calendar days with
//! inclusive boundaries: a stay ending on day X and one starting on day X
//! collide.
//!
//! ## Modules
//!
//! - [`date_range`] — Inclusive `[start, end]` day ranges with `end > start`
//! - [`overlap`] — Find bookings that collide with a candidate range
//! - [`window`] — Availability window containment check
//! - [`free_ranges`] — Sweep a window for maximal free ranges
//! - [`availability`] — `validate_booking` / `compute_free_ranges` facade
//! - [`error`] — Error types

pub mod availability;
pub mod date_range;
pub mod error;
pub mod free_ranges;
pub mod overlap;
pub mod window;

pub use availability::{
    availability_calendar, compute_free_ranges, validate_booking, AvailabilityCalendar,
};
pub use date_range::{parse_date, DateRange};
pub use error::AvailabilityError;
pub use free_ranges::{find_first_free_range, find_overlapping_bookings, FreeRange};
pub use overlap::{find_overlaps, has_overlap, BookedRange, BookingId, Overlap};
pub use window::check_within_window;

//! Inclusive, day-granularity date ranges.
//!
//! A [`DateRange`] covers every calendar day from `start` through `end`. The
//! invariant `end > start` is enforced at construction, at parse time and on
//! deserialization, so every value in circulation is a valid booking span.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// Wire format for dates: `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| AvailabilityError::InvalidDate(s.to_string()))
}

/// An immutable inclusive interval `[start, end]` of calendar days.
///
/// Ordering is by `start`, then by `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = AvailabilityError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range, rejecting zero-length and inverted spans.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvalidRange` when `end <= start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(AvailabilityError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights spanned (`end - start` in days).
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Two ranges overlap when they share at least one calendar day:
    /// `a.start <= b.end && a.end >= b.start`.
    ///
    /// Both ends are inclusive, so a range ending on day X conflicts with one
    /// starting on day X.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// True when `other` lies entirely within `self`.
    pub fn contains(&self, other: &DateRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Number of calendar days shared with `other`, 0 when disjoint.
    pub fn shared_days(&self, other: &DateRange) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end - start).num_days() + 1
    }

    /// Chronological comparison on `start` alone.
    pub fn compare_by_start(&self, other: &DateRange) -> Ordering {
        self.start.cmp(&other.start)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Parses `YYYY-MM-DD..YYYY-MM-DD`.
impl FromStr for DateRange {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| AvailabilityError::InvalidDate(s.to_string()))?;
        Self::parse(start, end)
    }
}

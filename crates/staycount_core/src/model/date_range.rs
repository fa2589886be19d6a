//! Stay-interval domain model.
//!
//! # Responsibility
//! - Define the inclusive calendar-day interval shared by store, calculator
//!   and compliance layers.
//! - Provide the day arithmetic every other module builds on.
//!
//! # Invariants
//! - `start <= end` for every constructed `DateRange`; reversed input is
//!   swapped, never rejected.
//! - Day counts are inclusive: a single-day range spans 1 day.
//! - Time-of-day never participates in comparisons or counts.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::fmt::{Display, Formatter};

/// Identity assigned by the persistence collaborator on first save.
pub type RangeId = i64;

const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// One continuous stay inside the territory, `[start, end]` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    /// `None` until the range has been persisted.
    pub id: Option<RangeId>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds an unsaved range, swapping the endpoints when `a > b`.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self {
            id: None,
            start,
            end,
        }
    }

    /// Builds an unsaved range from instants, dropping their time-of-day.
    pub fn from_datetimes(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        Self::new(a.date(), b.date())
    }

    /// Returns a copy carrying the identity handed out by storage.
    pub fn with_id(self, id: RangeId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// Inclusive number of days covered, always `>= 1`.
    pub fn days(&self) -> i64 {
        days_between(self.start, self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether `date` is the first or last day of this stay.
    pub fn is_boundary(&self, date: NaiveDate) -> bool {
        date == self.start || date == self.end
    }

    /// Whether this range lies completely inside `[start, end]`.
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start >= start && self.end <= end
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} → {}",
            self.start.format(DISPLAY_FORMAT),
            self.end.format(DISPLAY_FORMAT)
        )
    }
}

/// Normalizing constructor; see [`DateRange::new`].
pub fn make_range(a: NaiveDate, b: NaiveDate) -> DateRange {
    DateRange::new(a, b)
}

/// Inclusive whole-day count between two calendar days.
///
/// `days_between(d, d) == 1`. Callers must pass `a <= b`; a reversed pair is a
/// programming error and trips a debug assertion.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    debug_assert!(a <= b, "days_between called with reversed operands");
    b.signed_duration_since(a).num_days() + 1
}

/// Intersection of `range` with the closed window `[window_start, window_end]`.
///
/// The result carries no identity. Returns `None` when the two intervals do
/// not share a single day.
pub fn overlap(range: &DateRange, window_start: NaiveDate, window_end: NaiveDate) -> Option<DateRange> {
    let start = range.start.max(window_start);
    let end = range.end.min(window_end);
    if start > end {
        return None;
    }
    Some(DateRange {
        id: None,
        start,
        end,
    })
}

/// Parses a serialized calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` values. Timestamps are exported as the UTC
/// instant of local midnight, so the day is read back in the local zone.
pub fn parse_calendar_day(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Local).date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|instant| instant.date())
}

/// Serializes a calendar day as ISO-8601 `YYYY-MM-DD`.
pub fn format_calendar_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

//! Rolling-window day counting.
//!
//! # Responsibility
//! - Count days spent inside the territory within the window ending on a
//!   reference day.
//! - Answer per-day membership questions for calendar consumers.
//!
//! # Invariants
//! - Pure functions; no I/O and no shared state.
//! - Stored ranges are not assumed disjoint. Days covered by two ranges are
//!   counted twice.

use crate::config::Regime;
use crate::model::date_range::{overlap, DateRange};
use chrono::{Days, NaiveDate};

/// First day of the window of `regime.window_days` days ending on `reference`.
///
/// Clamps to the earliest representable date instead of overflowing.
pub fn window_start(reference: NaiveDate, regime: Regime) -> NaiveDate {
    let span = u64::from(regime.window_days.saturating_sub(1));
    reference
        .checked_sub_days(Days::new(span))
        .unwrap_or(NaiveDate::MIN)
}

/// Days in the default 180-day window ending on `reference`.
pub fn days_in_window(reference: NaiveDate, ranges: &[DateRange]) -> i64 {
    days_in_window_with(reference, ranges, Regime::default())
}

/// Sum of inclusive overlaps between every range and the regime window
/// ending on `reference`. Order of `ranges` does not matter.
pub fn days_in_window_with(reference: NaiveDate, ranges: &[DateRange], regime: Regime) -> i64 {
    let start = window_start(reference, regime);
    ranges
        .iter()
        .filter_map(|range| overlap(range, start, reference))
        .map(|clipped| clipped.days())
        .sum()
}

/// Whether any stored range covers `date`.
pub fn is_in_any_range(date: NaiveDate, ranges: &[DateRange]) -> bool {
    ranges.iter().any(|range| range.contains(date))
}

/// Whether `date` starts or ends any stored range.
pub fn is_range_boundary(date: NaiveDate, ranges: &[DateRange]) -> bool {
    ranges.iter().any(|range| range.is_boundary(date))
}

/// Whether the default window ending on `reference` holds more than 90 days.
pub fn exceeds_limit(reference: NaiveDate, ranges: &[DateRange]) -> bool {
    exceeds_limit_with(reference, ranges, Regime::default())
}

pub fn exceeds_limit_with(reference: NaiveDate, ranges: &[DateRange], regime: Regime) -> bool {
    days_in_window_with(reference, ranges, regime) > i64::from(regime.limit_days)
}

#[cfg(test)]
mod tests {
    use super::window_start;
    use crate::config::Regime;
    use chrono::NaiveDate;

    #[test]
    fn window_start_includes_reference_day() {
        let reference = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(
            window_start(reference, Regime::default()),
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()
        );
        assert_eq!(window_start(reference, Regime::new(1, 0).unwrap()), reference);
    }

    #[test]
    fn window_start_clamps_at_calendar_floor() {
        assert_eq!(
            window_start(NaiveDate::MIN, Regime::default()),
            NaiveDate::MIN
        );
    }
}

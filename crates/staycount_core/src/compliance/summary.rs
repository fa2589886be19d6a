//! Compliance readouts derived from window counts.
//!
//! # Responsibility
//! - Produce the coarse whole-history summary (days used / remaining).
//! - Produce per-day status used to paint a calendar cell.
//!
//! # Invariants
//! - `summary` is not window-limited; it sums every stored range.
//! - Per-day breach uses the rolling window only.
//! - The two lenses are intentionally different and must not be merged.

use crate::compliance::window::{days_in_window_with, is_in_any_range, is_range_boundary};
use crate::config::Regime;
use crate::model::date_range::DateRange;
use crate::model::selection::SelectionState;
use chrono::NaiveDate;

/// Whole-history readout shown next to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceSummary {
    /// Total stored days, capped at the regime limit.
    pub days_used: i64,
    /// Limit minus total stored days, floored at zero.
    pub days_remaining: i64,
    /// Total stored days exceed the limit.
    pub exceeds: bool,
}

/// Everything a calendar consumer needs for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStatus {
    pub date: NaiveDate,
    /// Some stored range covers this day.
    pub in_range: bool,
    /// This day starts or ends a stored range.
    pub boundary: bool,
    /// This day is the pending first click of an unfinished selection.
    pub pending_start: bool,
    /// Days inside the rolling window ending on this day.
    pub days_in_window: i64,
    pub exceeds_limit: bool,
}

/// Turns window counts into pass/fail signals for one regime.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceEvaluator {
    regime: Regime,
}

impl ComplianceEvaluator {
    pub fn new(regime: Regime) -> Self {
        Self { regime }
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Total-footprint summary across every stored range.
    pub fn summary(&self, ranges: &[DateRange]) -> ComplianceSummary {
        let total: i64 = ranges.iter().map(DateRange::days).sum();
        let limit = i64::from(self.regime.limit_days);
        ComplianceSummary {
            days_used: total.min(limit),
            days_remaining: (limit - total).max(0),
            exceeds: total > limit,
        }
    }

    /// Rolling-window breach check for a single day.
    pub fn exceeds_limit(&self, date: NaiveDate, ranges: &[DateRange]) -> bool {
        days_in_window_with(date, ranges, self.regime) > i64::from(self.regime.limit_days)
    }

    pub fn day_status(
        &self,
        date: NaiveDate,
        ranges: &[DateRange],
        selection: SelectionState,
    ) -> DayStatus {
        let days_in_window = days_in_window_with(date, ranges, self.regime);
        DayStatus {
            date,
            in_range: is_in_any_range(date, ranges),
            boundary: is_range_boundary(date, ranges),
            pending_start: selection.selection_start() == Some(date),
            days_in_window,
            exceeds_limit: days_in_window > i64::from(self.regime.limit_days),
        }
    }

    /// One status per day of `[from, to]`; reversed bounds are swapped.
    pub fn timeline(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        ranges: &[DateRange],
        selection: SelectionState,
    ) -> Vec<DayStatus> {
        let span = DateRange::new(from, to);
        span.start
            .iter_days()
            .take_while(|date| *date <= span.end)
            .map(|date| self.day_status(date, ranges, selection))
            .collect()
    }
}

/// Summary under the default 90/180 regime.
pub fn summary(ranges: &[DateRange]) -> ComplianceSummary {
    ComplianceEvaluator::default().summary(ranges)
}

//! Two-click selection gesture state.
//!
//! # Invariants
//! - Never persisted.
//! - Returns to `Idle` after every completed edit, split, or reset.

use chrono::NaiveDate;

/// State of the calendar selection gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No pending selection; a click either splits a stay or starts a new one.
    #[default]
    Idle,
    /// First day has been picked; the next click completes the range.
    StartPicked(NaiveDate),
}

impl SelectionState {
    /// Pending first day, if any.
    pub fn selection_start(&self) -> Option<NaiveDate> {
        match self {
            Self::Idle => None,
            Self::StartPicked(date) => Some(*date),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

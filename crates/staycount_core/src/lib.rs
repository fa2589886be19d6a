//! Core logic for StayCount.
//! This crate is the single source of truth for stay-interval and
//! rolling-window compliance invariants.

pub mod compliance;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use compliance::summary::{summary, ComplianceEvaluator, ComplianceSummary, DayStatus};
pub use compliance::window::{
    days_in_window, days_in_window_with, exceeds_limit, exceeds_limit_with, is_in_any_range,
    is_range_boundary, window_start,
};
pub use config::{Regime, RegimeError, DEFAULT_LIMIT_DAYS, DEFAULT_WINDOW_DAYS};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date_range::{
    days_between, format_calendar_day, make_range, overlap, parse_calendar_day, DateRange,
    RangeId,
};
pub use model::selection::SelectionState;
pub use repo::range_repo::{RangeRepository, RepoError, RepoResult, SqliteRangeRepository};
pub use service::interval_store::{IntervalStore, SelectOutcome, StoreError, StoreResult};
pub use service::transfer::{
    export_json, export_records, import_json, parse_import, RangeRecord, TransferError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

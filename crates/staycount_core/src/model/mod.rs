//! Domain model for stays and the selection gesture.
//!
//! # Responsibility
//! - Define the calendar-day interval every other layer computes with.
//! - Model the ephemeral two-click selection as explicit state.
//!
//! # Invariants
//! - Persisted ranges are identified by an integer handed out by storage.
//! - Dates are calendar days; no time zone or time-of-day is carried.

pub mod date_range;
pub mod selection;

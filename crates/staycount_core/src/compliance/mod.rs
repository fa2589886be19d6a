//! Rolling-window calculation and compliance evaluation.
//!
//! # Responsibility
//! - Count days inside a window ending on any reference day.
//! - Derive breach flags and summary readouts from those counts.
//!
//! # Invariants
//! - Everything here is pure and safe to call once per rendered day.

pub mod summary;
pub mod window;

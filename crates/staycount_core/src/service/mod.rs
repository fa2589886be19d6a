//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the calendar edit protocol.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod interval_store;
pub mod transfer;

//! Repository layer for stored stays.
//!
//! # Responsibility
//! - Define the persistence contract the interval store depends on.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - Every range entering the collection from storage passes through
//!   `make_range`.

pub mod range_repo;

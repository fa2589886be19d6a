//! Shared fixtures for store-level tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use staycount_core::{make_range, DateRange, RangeId, RangeRepository, RepoError, RepoResult};
use std::cell::{Cell, RefCell};

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    make_range(start, end)
}

/// Operation a `MemoryRangeRepository` can be told to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Load,
    Add,
    Delete,
    Clear,
}

/// In-memory persistence collaborator with switchable failures.
#[derive(Default)]
pub struct MemoryRangeRepository {
    rows: RefCell<Vec<DateRange>>,
    next_id: Cell<RangeId>,
    fail_on: Cell<Option<FailOn>>,
}

impl MemoryRangeRepository {
    pub fn with_rows(rows: &[(NaiveDate, NaiveDate)]) -> Self {
        let repo = Self::default();
        for (start, end) in rows {
            repo.add(*start, *end).unwrap();
        }
        repo
    }

    pub fn fail_on(&self, operation: Option<FailOn>) {
        self.fail_on.set(operation);
    }

    pub fn stored(&self) -> Vec<DateRange> {
        self.rows.borrow().clone()
    }

    fn check(&self, operation: FailOn) -> RepoResult<()> {
        if self.fail_on.get() == Some(operation) {
            return Err(RepoError::Unavailable(format!("{operation:?} rejected")));
        }
        Ok(())
    }
}

impl RangeRepository for MemoryRangeRepository {
    fn load_all(&self) -> RepoResult<Vec<DateRange>> {
        self.check(FailOn::Load)?;
        Ok(self.stored())
    }

    fn add(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<RangeId> {
        self.check(FailOn::Add)?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.rows.borrow_mut().push(make_range(start, end).with_id(id));
        Ok(id)
    }

    fn delete(&self, id: RangeId) -> RepoResult<()> {
        self.check(FailOn::Delete)?;
        self.rows.borrow_mut().retain(|row| row.id != Some(id));
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        self.check(FailOn::Clear)?;
        self.rows.borrow_mut().clear();
        Ok(())
    }
}

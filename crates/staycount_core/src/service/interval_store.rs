//! Authoritative in-memory collection of stays and the calendar edit gesture.
//!
//! # Responsibility
//! - Hydrate the collection from the persistence collaborator at startup.
//! - Apply add/delete/clear and the click-driven split/select protocol.
//!
//! # Invariants
//! - Every mutation is persisted first; the in-memory collection changes only
//!   after the repository call returned successfully.
//! - Selection state returns to `Idle` after every completed edit, split,
//!   reset, or abandoned gesture.
//! - Completing a selection removes only ranges fully inside it; partially
//!   overlapping ranges are kept as they are.

use crate::model::date_range::{make_range, DateRange, RangeId};
use crate::model::selection::SelectionState;
use crate::repo::range_repo::{RangeRepository, RepoError};
use chrono::NaiveDate;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failures surfaced to the caller.
#[derive(Debug)]
pub enum StoreError {
    /// Storage could not be opened or hydrated; fatal for the session.
    StorageUnavailable(RepoError),
    /// A persistence call failed mid-gesture; the gesture was abandoned.
    Persistence(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::Persistence(err) => write!(f, "persistence failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) | Self::Persistence(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

/// What a single calendar click did to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The click landed inside `removed`, which was replaced by `created`
    /// (zero, one, or two ranges).
    Split {
        removed: DateRange,
        created: Vec<DateRange>,
    },
    /// First day of a new selection has been picked.
    StartPicked(NaiveDate),
    /// Selection completed: `removed` were fully inside `created`.
    Completed {
        removed: Vec<DateRange>,
        created: DateRange,
    },
}

/// Owns the stored ranges and the pending selection.
pub struct IntervalStore<R: RangeRepository> {
    repo: R,
    ranges: Vec<DateRange>,
    selection: SelectionState,
}

impl<R: RangeRepository> IntervalStore<R> {
    /// Loads every stored range from `repo`.
    ///
    /// # Errors
    /// - `StorageUnavailable` when the initial load fails.
    pub fn init(repo: R) -> StoreResult<Self> {
        let ranges = repo.load_all().map_err(|err| {
            error!(
                "event=store_init module=store status=error error_code=load_failed error={}",
                err
            );
            StoreError::StorageUnavailable(err)
        })?;
        info!(
            "event=store_init module=store status=ok count={}",
            ranges.len()
        );
        Ok(Self {
            repo,
            ranges,
            selection: SelectionState::Idle,
        })
    }

    /// Replaces the in-memory collection with a fresh load.
    pub fn load_all(&mut self) -> StoreResult<&[DateRange]> {
        self.ranges = self.repo.load_all()?;
        Ok(&self.ranges)
    }

    /// Stored ranges in collection (insertion) order.
    pub fn ranges(&self) -> &[DateRange] {
        &self.ranges
    }

    /// Stored ranges ordered by start day, then id.
    pub fn sorted_ranges(&self) -> Vec<DateRange> {
        let mut sorted = self.ranges.clone();
        sorted.sort_by_key(|range| (range.start, range.end, range.id));
        sorted
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Persists `range` and appends it to the collection.
    pub fn add(&mut self, range: DateRange) -> StoreResult<RangeId> {
        let id = self.insert(make_range(range.start, range.end))?;
        info!("event=range_add module=store status=ok id={}", id);
        Ok(id)
    }

    /// Removes one range by id. Unknown ids are a no-op.
    pub fn delete(&mut self, id: RangeId) -> StoreResult<()> {
        self.repo.delete(id)?;
        let before = self.ranges.len();
        self.ranges.retain(|range| range.id != Some(id));
        info!(
            "event=range_delete module=store status=ok id={} removed={}",
            id,
            before - self.ranges.len()
        );
        Ok(())
    }

    /// Removes every range, persisted and in memory.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.repo.clear()?;
        let removed = self.ranges.len();
        self.ranges.clear();
        info!(
            "event=range_clear module=store status=ok removed={}",
            removed
        );
        Ok(())
    }

    /// Explicit user reset: clear everything and drop any pending selection.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.selection = SelectionState::Idle;
        self.clear()
    }

    /// Feeds one calendar click into the selection state machine.
    ///
    /// - `Idle` + click inside a stored range: split that range around the day.
    /// - `Idle` + click elsewhere: remember the day as selection start.
    /// - `StartPicked` + any click: drop ranges fully inside the normalized
    ///   selection and store the selection as one range.
    ///
    /// # Errors
    /// - `Persistence` when storage rejects a step; the gesture is abandoned
    ///   and the selection returns to `Idle`.
    pub fn select_date(&mut self, date: NaiveDate) -> StoreResult<SelectOutcome> {
        let result = match self.selection {
            SelectionState::Idle => match self.find_containing(date) {
                Some(target) => self.split(target, date),
                None => {
                    self.selection = SelectionState::StartPicked(date);
                    return Ok(SelectOutcome::StartPicked(date));
                }
            },
            SelectionState::StartPicked(start) => self.complete_selection(start, date),
        };

        self.selection = SelectionState::Idle;
        if let Err(err) = &result {
            warn!(
                "event=select_date module=store status=error error_code=gesture_abandoned error={}",
                err
            );
        }
        result
    }

    fn find_containing(&self, date: NaiveDate) -> Option<DateRange> {
        self.ranges.iter().find(|range| range.contains(date)).copied()
    }

    fn split(&mut self, target: DateRange, date: NaiveDate) -> StoreResult<SelectOutcome> {
        self.remove_stored(target)?;

        let mut created = Vec::with_capacity(2);
        if let Some(before) = date.pred_opt().filter(|day| *day >= target.start) {
            let piece = make_range(target.start, before);
            created.push(piece.with_id(self.insert(piece)?));
        }
        if let Some(after) = date.succ_opt().filter(|day| *day <= target.end) {
            let piece = make_range(after, target.end);
            created.push(piece.with_id(self.insert(piece)?));
        }

        info!(
            "event=range_split module=store status=ok removed_id={:?} created={}",
            target.id,
            created.len()
        );
        Ok(SelectOutcome::Split {
            removed: target,
            created,
        })
    }

    fn complete_selection(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<SelectOutcome> {
        let selection = make_range(start, end);
        let contained: Vec<DateRange> = self
            .ranges
            .iter()
            .filter(|range| range.is_within(selection.start, selection.end))
            .copied()
            .collect();

        for range in &contained {
            self.remove_stored(*range)?;
        }
        let created = selection.with_id(self.insert(selection)?);

        info!(
            "event=range_select module=store status=ok id={:?} days={} absorbed={}",
            created.id,
            created.days(),
            contained.len()
        );
        Ok(SelectOutcome::Completed {
            removed: contained,
            created,
        })
    }

    fn insert(&mut self, range: DateRange) -> StoreResult<RangeId> {
        let id = self.repo.add(range.start, range.end)?;
        self.ranges.push(range.with_id(id));
        Ok(id)
    }

    fn remove_stored(&mut self, range: DateRange) -> StoreResult<()> {
        if let Some(id) = range.id {
            self.repo.delete(id)?;
        }
        if let Some(index) = self.ranges.iter().position(|stored| *stored == range) {
            self.ranges.remove(index);
        }
        Ok(())
    }
}

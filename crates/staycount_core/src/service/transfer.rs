//! JSON import/export of stored stays.
//!
//! # Responsibility
//! - Produce the documented `[{id, start, end}]` export payload.
//! - Replace the whole collection from an import payload.
//!
//! # Invariants
//! - Imported `id` fields are ignored; storage assigns fresh ids.
//! - Every record is validated before the collection is cleared.
//! - A storage failure after `clear()` is reported, not rolled back.

use crate::model::date_range::{
    format_calendar_day, make_range, parse_calendar_day, DateRange, RangeId,
};
use crate::repo::range_repo::RangeRepository;
use crate::service::interval_store::{IntervalStore, StoreError};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Wire shape of one exported stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RangeId>,
    /// ISO-8601 calendar day.
    pub start: String,
    /// ISO-8601 calendar day.
    pub end: String,
}

/// Wire shape of one imported stay. Any `id` field, whatever its JSON type,
/// is skipped as an unknown field.
#[derive(Debug, Deserialize)]
struct ImportRecord {
    /// ISO-8601 calendar day or timestamp.
    start: String,
    /// ISO-8601 calendar day or timestamp.
    end: String,
}

impl From<&DateRange> for RangeRecord {
    fn from(range: &DateRange) -> Self {
        Self {
            id: range.id,
            start: format_calendar_day(range.start),
            end: format_calendar_day(range.end),
        }
    }
}

#[derive(Debug)]
pub enum TransferError {
    /// Payload is not a JSON array of well-formed records.
    InvalidFormat(String),
    /// Storage failed while replacing the collection.
    Store(StoreError),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(message) => write!(f, "invalid import format: {message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFormat(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for TransferError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Converts ranges into their wire records, preserving order.
pub fn export_records(ranges: &[DateRange]) -> Vec<RangeRecord> {
    ranges.iter().map(RangeRecord::from).collect()
}

/// Pretty-printed JSON array of every range.
pub fn export_json(ranges: &[DateRange]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&export_records(ranges))
}

/// Replaces the whole collection with the records in `payload`.
///
/// Returns the number of imported ranges.
///
/// # Errors
/// - `InvalidFormat` when the payload is not an array or any record is
///   malformed; the collection is untouched in that case.
/// - `Store` when persistence fails; the collection may already be cleared.
pub fn import_json<R: RangeRepository>(
    store: &mut IntervalStore<R>,
    payload: &str,
) -> Result<usize, TransferError> {
    let ranges = parse_import(payload).inspect_err(|err| {
        error!(
            "event=range_import module=transfer status=error error_code=invalid_format error={}",
            err
        );
    })?;

    store.clear()?;
    for range in &ranges {
        store.add(*range)?;
    }

    info!(
        "event=range_import module=transfer status=ok count={}",
        ranges.len()
    );
    Ok(ranges.len())
}

/// Validates an import payload without touching any store.
pub fn parse_import(payload: &str) -> Result<Vec<DateRange>, TransferError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|err| TransferError::InvalidFormat(format!("not valid JSON: {err}")))?;
    let Value::Array(items) = value else {
        return Err(TransferError::InvalidFormat(
            "top-level value must be an array".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record: ImportRecord = serde_json::from_value(item).map_err(|err| {
                TransferError::InvalidFormat(format!("record {index}: {err}"))
            })?;
            record_to_range(index, &record)
        })
        .collect()
}

fn record_to_range(index: usize, record: &ImportRecord) -> Result<DateRange, TransferError> {
    let parse = |field: &str, value: &str| {
        parse_calendar_day(value).ok_or_else(|| {
            TransferError::InvalidFormat(format!("record {index}: invalid {field} `{value}`"))
        })
    };
    let start = parse("start", &record.start)?;
    let end = parse("end", &record.end)?;
    Ok(make_range(start, end))
}

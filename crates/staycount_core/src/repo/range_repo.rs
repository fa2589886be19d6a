//! Range repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the persistence collaborator consumed by `IntervalStore`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Storage is the only source of `RangeId` values; ids are never reused.
//! - Days are stored as ISO-8601 `YYYY-MM-DD` text.
//! - `delete` is idempotent; deleting an unknown id is not an error.
//! - Read paths reject unparseable rows instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::date_range::{
    format_calendar_day, make_range, parse_calendar_day, DateRange, RangeId,
};
use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RANGES_TABLE: &str = "date_ranges";
const REQUIRED_COLUMNS: [&str; 4] = ["id", "start_day", "end_day", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for range persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A stored row could not be turned into a `DateRange`.
    InvalidData(String),
    /// Connection has not been migrated to the version this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Generic failure for `RangeRepository` implementations that are not
    /// backed by SQLite (remote stores, in-memory fakes).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted range data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::Unavailable(message) => write!(f, "range storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence collaborator for stored stays.
pub trait RangeRepository {
    /// Returns every stored range in insertion order.
    fn load_all(&self) -> RepoResult<Vec<DateRange>>;
    /// Stores a new range and returns its freshly assigned id.
    fn add(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<RangeId>;
    /// Removes one range; unknown ids are ignored.
    fn delete(&self, id: RangeId) -> RepoResult<()>;
    /// Removes every stored range.
    fn clear(&self) -> RepoResult<()>;
}

impl<R: RangeRepository + ?Sized> RangeRepository for &R {
    fn load_all(&self) -> RepoResult<Vec<DateRange>> {
        (**self).load_all()
    }

    fn add(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<RangeId> {
        (**self).add(start, end)
    }

    fn delete(&self, id: RangeId) -> RepoResult<()> {
        (**self).delete(id)
    }

    fn clear(&self) -> RepoResult<()> {
        (**self).clear()
    }
}

/// SQLite-backed range repository.
pub struct SqliteRangeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRangeRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_range_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RangeRepository for SqliteRangeRepository<'_> {
    fn load_all(&self) -> RepoResult<Vec<DateRange>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, start_day, end_day
             FROM date_ranges
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut ranges = Vec::new();
        while let Some(row) = rows.next()? {
            ranges.push(parse_range_row(row)?);
        }
        debug!(
            "event=range_load module=repo status=ok count={}",
            ranges.len()
        );
        Ok(ranges)
    }

    fn add(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<RangeId> {
        let range = make_range(start, end);
        self.conn.execute(
            "INSERT INTO date_ranges (start_day, end_day) VALUES (?1, ?2);",
            params![
                format_calendar_day(range.start),
                format_calendar_day(range.end)
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete(&self, id: RangeId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM date_ranges WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM date_ranges;", [])?;
        Ok(())
    }
}

fn parse_range_row(row: &Row<'_>) -> RepoResult<DateRange> {
    let id: RangeId = row.get("id")?;
    let start = parse_day_column(row, "start_day", id)?;
    let end = parse_day_column(row, "end_day", id)?;
    Ok(make_range(start, end).with_id(id))
}

fn parse_day_column(row: &Row<'_>, column: &'static str, id: RangeId) -> RepoResult<NaiveDate> {
    let text: String = row.get(column)?;
    parse_calendar_day(&text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid day `{text}` in {RANGES_TABLE}.{column} for id {id}"
        ))
    })
}

fn ensure_range_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, RANGES_TABLE)? {
        return Err(RepoError::MissingRequiredTable(RANGES_TABLE));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, RANGES_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: RANGES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

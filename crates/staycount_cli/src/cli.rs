use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use staycount_core::{Regime, RegimeError, DEFAULT_LIMIT_DAYS, DEFAULT_WINDOW_DAYS};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// SQLite file holding the stored stays. Created on first use.
    #[clap(long = "db", env = "STAYCOUNT_DB_PATH")]
    pub db_path: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[clap(long, env = "STAYCOUNT_LOG_DIR")]
    pub log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[clap(long, env = "STAYCOUNT_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[clap(flatten)]
    pub regime: RegimeArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs)]
pub struct RegimeArgs {
    /// Length of the rolling window in days.
    #[clap(long, env = "STAYCOUNT_WINDOW_DAYS", default_value_t = DEFAULT_WINDOW_DAYS)]
    pub window_days: u32,

    /// Maximum days allowed inside the window.
    #[clap(long, env = "STAYCOUNT_LIMIT_DAYS", default_value_t = DEFAULT_LIMIT_DAYS)]
    pub limit_days: u32,
}

impl RegimeArgs {
    pub fn regime(&self) -> Result<Regime, RegimeError> {
        Regime::new(self.window_days, self.limit_days)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show stored stays sorted by start day.
    #[clap(name = "list")]
    List,

    /// Click calendar days in order: split a stay, or pick two days to add one.
    #[clap(name = "select")]
    Select {
        #[clap(required = true)]
        dates: Vec<NaiveDate>,
    },

    /// Store a stay directly; reversed days are swapped.
    #[clap(name = "add")]
    Add { start: NaiveDate, end: NaiveDate },

    /// Delete one stay by id.
    #[clap(name = "delete")]
    Delete { id: i64 },

    /// Delete every stored stay.
    #[clap(name = "reset")]
    Reset {
        /// Confirm the reset.
        #[clap(long)]
        yes: bool,
    },

    /// Days used in the window ending on a day, and whether the cap is breached.
    #[clap(name = "check")]
    Check {
        /// Defaults to today.
        #[clap(long)]
        date: Option<NaiveDate>,
    },

    /// Whole-history days used and remaining.
    #[clap(name = "summary")]
    Summary,

    /// Per-day status for a span of days.
    #[clap(name = "timeline")]
    Timeline {
        #[clap(long)]
        from: NaiveDate,

        #[clap(long)]
        to: NaiveDate,
    },

    /// Write stored stays as a JSON array.
    #[clap(name = "export")]
    Export {
        /// Output file; stdout when omitted.
        #[clap(long)]
        out: Option<PathBuf>,
    },

    /// Replace stored stays with a JSON array exported earlier.
    #[clap(name = "import")]
    Import { file: PathBuf },
}

//! StayCount command-line entry point.
//!
//! # Responsibility
//! - Stand in for the calendar UI: feed clicks, edits and imports into the
//!   core store and print compliance readouts.
//! - Resolve runtime configuration from flags and environment variables.

mod cli;
mod tables;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::info;
use staycount_core::db::open_db;
use staycount_core::{
    default_log_level, export_json, import_json, init_logging, make_range, ComplianceEvaluator,
    IntervalStore, RangeRepository, SelectOutcome, SqliteRangeRepository, StoreError,
};

use crate::cli::{Args, Command};
use crate::tables::{build_ranges_table, build_timeline_table};

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let evaluator = ComplianceEvaluator::new(args.regime.regime()?);
    let db_path = args.db_path;
    info!(
        "event=cli_start module=cli status=ok version={}",
        staycount_core::core_version()
    );

    let conn = open_db(&db_path)
        .map_err(|err| StoreError::StorageUnavailable(err.into()))
        .with_context(|| format!("cannot open `{}`", db_path.display()))?;
    let repo = SqliteRangeRepository::try_new(&conn).map_err(StoreError::StorageUnavailable)?;
    let mut store = IntervalStore::init(repo)?;

    run(args.command, &mut store, &evaluator)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run<R: RangeRepository>(
    command: Command,
    store: &mut IntervalStore<R>,
    evaluator: &ComplianceEvaluator,
) -> Result<()> {
    match command {
        Command::List => {
            let ranges = store.sorted_ranges();
            if ranges.is_empty() {
                println!("No stays recorded yet. Use `select` or `add` to record one.");
            } else {
                println!("{}", build_ranges_table(&ranges));
            }
        }
        Command::Select { dates } => {
            for date in dates {
                let outcome = store
                    .select_date(date)
                    .with_context(|| format!("click on {date} abandoned"))?;
                print_outcome(&outcome);
            }
            if let Some(start) = store.selection().selection_start() {
                println!("Selection from {start} left unfinished; it is not saved.");
            }
        }
        Command::Add { start, end } => {
            let range = make_range(start, end);
            let id = store.add(range)?;
            println!("Added #{id}: {range} ({} days)", range.days());
        }
        Command::Delete { id } => {
            store.delete(id)?;
            println!("Deleted #{id} (if it existed).");
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("refusing to clear all stays without --yes");
            }
            store.reset()?;
            println!("All stays cleared.");
        }
        Command::Check { date } => {
            let date = date.unwrap_or_else(today);
            let status = evaluator.day_status(date, store.ranges(), store.selection());
            let regime = evaluator.regime();
            println!(
                "{date}: {} of {} days used in the {}-day window ending that day",
                status.days_in_window, regime.limit_days, regime.window_days
            );
            if status.exceeds_limit {
                println!("Limit exceeded.");
            }
        }
        Command::Summary => {
            let summary = evaluator.summary(store.ranges());
            println!("Days used: {}", summary.days_used);
            println!("Days remaining: {}", summary.days_remaining);
            if summary.exceeds {
                println!(
                    "You have exceeded the {}-day limit!",
                    evaluator.regime().limit_days
                );
            }
        }
        Command::Timeline { from, to } => {
            let statuses = evaluator.timeline(from, to, store.ranges(), store.selection());
            println!(
                "{}",
                build_timeline_table(&statuses, today(), evaluator.regime().limit_days)
            );
        }
        Command::Export { out } => {
            let payload = export_json(store.ranges())?;
            match out {
                Some(path) => {
                    std::fs::write(&path, payload)
                        .with_context(|| format!("cannot write `{}`", path.display()))?;
                    println!("Exported {} stays to {}", store.ranges().len(), path.display());
                }
                None => println!("{payload}"),
            }
        }
        Command::Import { file } => {
            let payload = std::fs::read_to_string(&file)
                .with_context(|| format!("cannot read `{}`", file.display()))?;
            let count = import_json(store, &payload)?;
            println!("Imported {count} stays.");
        }
    }
    Ok(())
}

fn print_outcome(outcome: &SelectOutcome) {
    match outcome {
        SelectOutcome::StartPicked(date) => println!("Start picked: {date}"),
        SelectOutcome::Split { removed, created } if created.is_empty() => {
            println!("Removed {removed}");
        }
        SelectOutcome::Split { removed, created } => {
            let pieces: Vec<String> = created.iter().map(ToString::to_string).collect();
            println!("Split {removed} into {}", pieces.join(" and "));
        }
        SelectOutcome::Completed { removed, created } => {
            println!("Added {created} ({} days)", created.days());
            for absorbed in removed {
                println!("  replaced {absorbed}");
            }
        }
    }
}

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use aedrecords::{
    audit::FileAuditLog,
    config::AppConfig,
    core::store::RecordStore,
    patient::{PatientOverrides, PatientRecord, PatientUpdate},
    query::{self, QueryError},
    session::{
        handle::Session,
        outcome::{DashboardView, DeleteReply, ModifyOutcome},
    },
    types::{BreachStatus, NumericColumn},
};

#[derive(Parser)]
#[command(name = "aedrecords")]
#[command(version, about = "Search, filter, edit, and delete A&E patient records")]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backing CSV file (overrides the settings file)
    #[arg(long, global = true, value_name = "CSV")]
    data: Option<PathBuf>,

    /// Audit log file (overrides the settings file)
    #[arg(long, global = true, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Totals, breach distribution, and length-of-stay histogram
    Dashboard {
        /// Histogram bar count
        #[arg(long)]
        buckets: Option<usize>,
    },
    /// Every row with ID
    Search { id: String },
    /// Patients whose column lies in LOW..=HIGH
    #[command(allow_negative_numbers = true)]
    Filter {
        column: String,
        low: i64,
        high: i64,
    },
    /// Observed min and max of a filterable column
    Bounds { column: String },
    /// Edit a patient; omitted fields keep their current value
    Modify {
        id: String,
        #[arg(long)]
        age: Option<i64>,
        #[arg(long)]
        los: Option<i64>,
        #[arg(long)]
        investigations: Option<i64>,
        #[arg(long)]
        treatments: Option<i64>,
        #[arg(long, value_parser = ["non-breach", "breach"])]
        breach: Option<String>,
    },
    /// Delete every row with ID
    Delete {
        id: String,
        /// Confirm the permanent deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aedrecords=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(data) = cli.data {
        cfg.data_file = data;
    }
    if let Some(log) = cli.log {
        cfg.log_file = log;
    }

    let store = RecordStore::open(&cfg.data_file, cfg.store_config())
        .with_context(|| format!("loading {}", cfg.data_file.display()))?;
    let audit = Box::new(FileAuditLog::new(&cfg.log_file));
    let mut session = Session::new(store, audit, cfg.histogram_buckets);
    let json = cli.json;

    match cli.command {
        Command::Dashboard { buckets } => {
            let view = match buckets {
                Some(n) => session.dashboard_with_buckets(n)?,
                None => session.dashboard()?,
            };
            emit(json, &view, print_dashboard)?;
        }
        Command::Search { id } => {
            let rows = session.search_all(&id);
            emit(json, &rows, |rows| {
                if rows.is_empty() {
                    println!("No patient found with ID {id}.");
                } else {
                    print_records(rows);
                }
            })?;
        }
        Command::Filter { column, low, high } => {
            let rows = session.filter(&column, low, high)?;
            emit(json, &rows, |rows| {
                println!("{} patients with {column} in range ({low}, {high})", rows.len());
                print_records(rows);
            })?;
        }
        Command::Bounds { column } => {
            let column = column
                .parse::<NumericColumn>()
                .map_err(|err| QueryError::InvalidColumn(err.0))?;
            let bounds = query::column_bounds(session.store().records(), column);
            emit(json, &bounds, |bounds| match bounds {
                Some((lo, hi)) => println!("{column}: {lo}..={hi}"),
                None => println!("{column}: no rows"),
            })?;
        }
        Command::Modify {
            id,
            age,
            los,
            investigations,
            treatments,
            breach,
        } => {
            let outcome = match session.store().find_by_id(&id) {
                Some(current) => {
                    let overrides = PatientOverrides {
                        age,
                        length_of_stay: los,
                        investigation_count: investigations,
                        treatment_count: treatments,
                        breach_status: breach.map(BreachStatus::from),
                    };
                    let update = PatientUpdate::merged(current, overrides);
                    session.modify(&id, update)?
                }
                None => ModifyOutcome::NotFound,
            };
            emit(json, &outcome, |outcome| match outcome {
                ModifyOutcome::Updated => println!("Patient record updated successfully."),
                ModifyOutcome::NotFound => println!("Enter a valid Patient ID to modify."),
            })?;
        }
        Command::Delete { id, yes } => {
            let reply = session.delete(&id, yes)?;
            emit(json, &reply, |reply| match reply {
                DeleteReply::Deleted { removed } => {
                    println!("Patient record deleted successfully ({removed} row(s)).")
                }
                DeleteReply::NotFound => println!("Patient ID not found."),
                DeleteReply::ConfirmationRequired => {
                    println!("Please confirm deletion before proceeding (--yes).")
                }
            })?;
        }
    }

    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

fn print_dashboard(view: &DashboardView) {
    let summary = &view.summary;
    println!("Total patients:         {}", summary.total_count);
    println!("Breach cases:           {}", summary.breach_count);
    match summary.mean_length_of_stay {
        Some(mean) => println!("Average length of stay: {mean:.2}"),
        None => println!("Average length of stay: n/a"),
    }

    println!();
    println!("Breach vs non-breach");
    for (label, count) in view.distribution.entries() {
        println!("  {label:<11} {count}");
    }

    println!();
    println!("Length of stay (minutes)");
    for bucket in &view.histogram {
        println!(
            "  {:>8.1} - {:>8.1}  {}",
            bucket.low, bucket.high, bucket.frequency
        );
    }
}

fn print_records(rows: &[PatientRecord]) {
    println!(
        "{:<12} {:>5} {:>6} {:>6} {:>6} {:>6}  {}",
        "ID", "Age", "LoS", "Invest", "Treat", "Pats", "Breach"
    );
    for r in rows {
        println!(
            "{:<12} {:>5} {:>6} {:>6} {:>6} {:>6}  {}",
            r.id,
            r.age,
            r.length_of_stay,
            r.investigation_count,
            r.treatment_count,
            r.patient_count,
            r.breach_status
        );
    }
}

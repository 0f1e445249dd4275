// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # evcharge
//!
//! Command-line driver for the EV charging reliability pipeline.
//!
//! ```text
//! evcharge generate --output sessions.csv
//! evcharge load --input sessions.csv --database ev_charging.db
//! evcharge report --database ev_charging.db --format json
//! evcharge run
//! ```
//!
//! `run` performs every stage in order: generate, transform, ensure the
//! schema, load dimensions, load facts, aggregate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod report;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, ensure},
};
use evcharge_domain::TransformedRecord;
use evcharge_persistence::{DimensionLoadSummary, Persistence};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

use crate::report::Report;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// EV charging ETL and reliability KPI pipeline
#[derive(Debug, Parser)]
#[command(name = "evcharge", author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a synthetic charging session dataset
    #[command(visible_alias = "g")]
    Generate {
        /// CSV file to write
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Transform a dataset and load it into the star schema
    #[command(visible_alias = "l")]
    Load {
        /// CSV dataset to read
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Print station KPIs and the daily series
    #[command(visible_alias = "r")]
    Report {
        #[command(flatten)]
        store: StoreArgs,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Generate, load and report in one pass
    Run {
        /// CSV file to write the generated dataset to
        #[arg(long, default_value = "charging_sessions.csv")]
        dataset: PathBuf,

        #[command(flatten)]
        generator: GeneratorArgs,

        #[command(flatten)]
        store: StoreArgs,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, clap::Args)]
struct GeneratorArgs {
    /// Number of sessions to generate
    #[arg(long, default_value_t = 500)]
    sessions: u64,

    /// Number of stations to spread sessions over
    #[arg(long, default_value_t = 10)]
    stations: u32,

    /// Seed for the pseudorandom generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Clone, clap::Args)]
struct StoreArgs {
    /// Path to the `SQLite` star-schema store
    #[arg(short, long, default_value = "ev_charging.db")]
    database: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::Generate { output, generator } => {
                generate_dataset(&output, &generator)?;
            }
            Self::Load { input, store } => {
                let outcome: LoadOutcome = load_dataset(&input, &store.database)?;
                println!(
                    "Loaded {} sessions into {} ({} new stations, {} new dates)",
                    outcome.facts,
                    store.database.display(),
                    outcome.dimensions.stations_inserted,
                    outcome.dimensions.dates_inserted
                );
            }
            Self::Report { store, format } => {
                print_report(&build_report(&store.database)?, format)?;
            }
            Self::Run {
                dataset,
                generator,
                store,
                format,
            } => {
                generate_dataset(&dataset, &generator)?;
                load_dataset(&dataset, &store.database)?;
                print_report(&build_report(&store.database)?, format)?;
            }
        }
        Ok(())
    }
}

fn generate_dataset(output: &Path, generator: &GeneratorArgs) -> Result<u64> {
    evcharge_etl::generate(
        output,
        generator.sessions,
        generator.stations,
        generator.seed,
    )
    .wrap_err_with(|| format!("Failed to generate dataset at {}", output.display()))
}

/// Counts from one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoadOutcome {
    dimensions: DimensionLoadSummary,
    facts: usize,
}

fn load_dataset(input: &Path, database: &Path) -> Result<LoadOutcome> {
    let records: Vec<TransformedRecord> = evcharge_etl::transform(input)
        .wrap_err_with(|| format!("Failed to transform {}", input.display()))?;

    let mut store: Persistence = Persistence::open(database)
        .wrap_err_with(|| format!("Failed to open store at {}", database.display()))?;
    store
        .ensure_schema()
        .wrap_err("Failed to create star schema")?;

    let dimensions: DimensionLoadSummary = store
        .load_dimensions(&records)
        .wrap_err("Failed to load dimensions")?;
    let facts: usize = store
        .load_facts(&records)
        .wrap_err("Failed to load facts")?;

    info!(
        database = %database.display(),
        facts,
        stations_inserted = dimensions.stations_inserted,
        dates_inserted = dimensions.dates_inserted,
        "Loaded dataset"
    );

    Ok(LoadOutcome { dimensions, facts })
}

/// Aggregates an existing store. A missing store file is an error and is
/// never created.
fn build_report(database: &Path) -> Result<Report> {
    ensure!(
        database.is_file(),
        "No store at {}; run `evcharge load` first",
        database.display()
    );

    let mut store: Persistence = Persistence::open(database)
        .wrap_err_with(|| format!("Failed to open store at {}", database.display()))?;

    Ok(Report {
        station_kpis: store
            .station_kpis()
            .wrap_err("Failed to aggregate station KPIs")?,
        daily_series: store
            .daily_series()
            .wrap_err("Failed to aggregate daily series")?,
    })
}

fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    let rendered: String = match format {
        OutputFormat::Table => report.to_table(),
        OutputFormat::Json => report.to_json().wrap_err("Failed to serialize report")?,
    };
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use clap::CommandFactory;
    use evcharge_persistence::PersistenceError;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let args = Args::try_parse_from(["evcharge", "generate", "--output", "out.csv"]).unwrap();

        match args.command {
            Command::Generate { output, generator } => {
                assert_eq!(output, PathBuf::from("out.csv"));
                assert_eq!(generator.sessions, 500);
                assert_eq!(generator.stations, 10);
                assert_eq!(generator.seed, 42);
            }
            other => panic!("Expected generate, got {other:?}"),
        }
    }

    #[test]
    fn test_report_accepts_json_format() {
        let args = Args::try_parse_from(["evcharge", "report", "--format", "json"]).unwrap();

        match args.command {
            Command::Report { store, format } => {
                assert_eq!(store.database, PathBuf::from("ev_charging.db"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("Expected report, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_requires_output() {
        assert!(Args::try_parse_from(["evcharge", "generate"]).is_err());
    }

    #[test]
    fn test_pipeline_stages_against_a_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("sessions.csv");
        let database = dir.path().join("ev_charging.db");
        let generator = GeneratorArgs {
            sessions: 120,
            stations: 4,
            seed: 9,
        };

        assert_eq!(generate_dataset(&dataset, &generator).unwrap(), 120);
        let first = load_dataset(&dataset, &database).unwrap();
        let second = load_dataset(&dataset, &database).unwrap();
        let report = build_report(&database).unwrap();

        assert_eq!(first.facts, 120);
        assert!(first.dimensions.stations_inserted <= 4);
        assert_eq!(second.facts, 120);
        assert_eq!(second.dimensions, DimensionLoadSummary::default());
        assert_eq!(
            report
                .station_kpis
                .iter()
                .map(|kpi| kpi.total_sessions)
                .sum::<u64>(),
            120
        );
        assert!(!report.daily_series.is_empty());
    }

    #[test]
    fn test_report_on_missing_store_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let database = dir.path().join("mistyped.db");

        assert!(build_report(&database).is_err());
        assert!(!database.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_report_on_uninitialized_store_fails() {
        let dir = tempfile::tempdir().unwrap();
        let database = dir.path().join("empty.db");
        std::fs::File::create(&database).unwrap();

        let err = build_report(&database).unwrap_err();

        assert!(
            err.chain().any(|cause| cause
                .downcast_ref::<PersistenceError>()
                .is_some_and(|e| *e == PersistenceError::SchemaNotInitialized)),
            "{err:#}"
        );
    }
}

use std::fs;
use std::io::{stderr, stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Local;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use conversion_ledger::config::LedgerConfig;
use conversion_ledger::extraction::{ImagePayload, Intake, IntakeState, RecordedExtractor};
use conversion_ledger::ledger::{BootstrapLoader, FileSeedSource, RecordStore};
use conversion_ledger::models::newest_first;
use conversion_ledger::reporting::{export_csv, export_json, ExportFile, LedgerStats};
use conversion_ledger::storage::{BlobStore, FileBlobStore};
use conversion_ledger::types::now_millis;

const USAGE: &str = "Usage: conversion-ledger <command>
Commands:
  list                                   Show all records, newest first
  stats                                  Show totals and the daily series
  import <response.json> [image.dataurl] Confirm a captured extraction response
  remove <id>                            Delete a record
  export-csv <directory>                 Write the spreadsheet export
  export-json <directory>                Write data.json
Environment: LEDGER_DATA_DIR (default .), LEDGER_SEED_PATH (default ./data.json),
             LEDGER_LOG = error | warn | info | debug | trace (default error)";

enum Command {
    List,
    Stats,
    Import { response: PathBuf, image: Option<PathBuf> },
    Remove(String),
    ExportCsv(PathBuf),
    ExportJson(PathBuf)
}

impl Command {
    fn parse(args: &[String]) -> Option<Self> {
        let command = args.get(1)?;
        let argument = args.get(2);

        match (command.as_str(), argument) {
            ("list", None) => Some(Command::List),
            ("stats", None) => Some(Command::Stats),
            ("import", Some(response)) => Some(Command::Import {
                response: PathBuf::from(response),
                image: args.get(3).map(PathBuf::from)
            }),
            ("remove", Some(record_id)) => Some(Command::Remove(record_id.clone())),
            ("export-csv", Some(directory)) => Some(Command::ExportCsv(PathBuf::from(directory))),
            ("export-json", Some(directory)) => Some(Command::ExportJson(PathBuf::from(directory))),
            _ => None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Kept to hand-rolled parsing, the command surface is small enough that clap would mostly add weight.
    let args: Vec<String> = std::env::args().collect();

    let Some(command) = Command::parse(&args) else {
        eprintln!("{USAGE}");
        exit(1);
    };

    let config = LedgerConfig::from_env();
    setup_logging(config.log_level);

    let blob_store = Arc::new(FileBlobStore::new(&config.data_dir));
    let seed = FileSeedSource::new(&config.seed_path);
    let mut store = BootstrapLoader::new(blob_store, seed).into_store().await;

    info!("Ledger ready with {} records", store.len());

    match command {
        Command::List => write_records(&store)?,
        Command::Stats => write_stats(&store.stats())?,
        Command::Import { response, image } => import(&mut store, &response, image.as_deref()).await?,
        Command::Remove(record_id) => remove(&mut store, &record_id)?,
        Command::ExportCsv(directory) => write_export(export_csv(store.list(), now_millis())?, &directory)?,
        Command::ExportJson(directory) => write_export(export_json(store.list())?, &directory)?
    }

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries command output, logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_records<B: BlobStore>(store: &RecordStore<B>) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    if store.is_empty() {
        writeln!(output, "No transactions yet")?;
    }

    for record in newest_first(store.list()) {
        let (time, date) = record.display_parts();

        writeln!(
            output,
            "{} | {} | -{} PI | +{} USDT | {} | {}",
            time,
            date,
            record.source_amount,
            record.target_amount,
            record.status,
            record.id
        )?;
    }

    output.flush()?;

    Ok(())
}

fn write_stats(stats: &LedgerStats) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    if stats.is_empty() {
        writeln!(output, "No transactions yet")?;
        output.flush()?;
        return Ok(());
    }

    let summary = &stats.summary;

    writeln!(output, "transactions: {}", summary.count)?;
    writeln!(output, "total PI: {}", summary.total_source.normalize())?;
    writeln!(output, "total USDT: {}", summary.total_target.normalize())?;
    writeln!(output, "average rate: {}", summary.average_rate.round_dp(8).normalize())?;
    writeln!(output, "day,PI,USDT")?;

    for bucket in &stats.series {
        writeln!(output, "{},{},{}", bucket.label, bucket.source_sum.normalize(), bucket.target_sum.normalize())?;
    }

    output.flush()?;

    Ok(())
}

async fn import<B: BlobStore>(store: &mut RecordStore<B>, response: &Path, image: Option<&Path>) -> Result<()> {
    let response = fs::read_to_string(response)
        .with_context(|| format!("Could not read extraction response {}", response.display()))?;

    let image = match image {
        Some(path) => ImagePayload::from_data_url(
            &fs::read_to_string(path).with_context(|| format!("Could not read image payload {}", path.display()))?
        ),
        None => ImagePayload::default()
    };

    let mut intake = Intake::new();

    if let IntakeState::Failed(message) = intake.submit(&RecordedExtractor::new(response), &image).await {
        bail!("{message}");
    }

    if let Some(record) = intake.confirm(store, &Local::now())? {
        println!("Imported record {}", record.id);
    }

    Ok(())
}

fn remove<B: BlobStore>(store: &mut RecordStore<B>, record_id: &str) -> Result<()> {
    match store.remove(record_id)? {
        0 => println!("No record with id {record_id}"),
        removed => println!("Removed {removed} record(s) with id {record_id}")
    }

    Ok(())
}

fn write_export(export: Option<ExportFile>, directory: &Path) -> Result<()> {
    match export {
        Some(file) => {
            let path = file.write_to(directory)
                .with_context(|| format!("Could not write export into {}", directory.display()))?;
            println!("{}", path.display());
        }
        None => println!("Nothing to export")
    }

    Ok(())
}

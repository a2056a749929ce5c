pub mod cell;
pub mod cli;
pub mod costing;
pub mod dates;
pub mod fields;
pub mod quality;
pub mod record;
pub mod report;
pub mod resolve;
pub mod workbook;

use std::{env, fs, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use serde::Serialize;

use crate::cli::{Cli, Commands, ParseArgs, SheetsArgs};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("mill_intake", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Quality(args) => handle_quality(&args),
        Commands::Costing(args) => handle_costing(&args),
        Commands::Sheets(args) => handle_sheets(&args),
    }
}

fn handle_quality(args: &ParseArgs) -> Result<()> {
    let bytes = read_workbook(&args.input)?;
    let parsed = workbook::parse_quality(&bytes)
        .with_context(|| format!("Parsing quality data from {:?}", args.input))?;
    info!(
        "Parsed {} quality record(s) from {:?}, skipped {} row(s)",
        parsed.len(),
        args.input,
        parsed.skipped
    );
    if args.preview {
        print!("{}", report::quality_table(&parsed.records, args.limit));
    }
    if let Some(path) = &args.json {
        write_json(path, &parsed.records)?;
    }
    Ok(())
}

fn handle_costing(args: &ParseArgs) -> Result<()> {
    let bytes = read_workbook(&args.input)?;
    let parsed = workbook::parse_costing(&bytes)
        .with_context(|| format!("Parsing costing data from {:?}", args.input))?;
    info!(
        "Parsed {} costing record(s) from {:?}, skipped {} row(s)",
        parsed.len(),
        args.input,
        parsed.skipped
    );
    if args.preview {
        print!("{}", report::costing_table(&parsed.records, args.limit));
    }
    if let Some(path) = &args.json {
        write_json(path, &parsed.records)?;
    }
    Ok(())
}

fn handle_sheets(args: &SheetsArgs) -> Result<()> {
    let bytes = read_workbook(&args.input)?;
    let names = workbook::sheet_names(&bytes)
        .with_context(|| format!("Reading workbook {:?}", args.input))?;
    for name in &names {
        println!("{name}");
    }
    info!("{:?} contains {} sheet(s)", args.input, names.len());
    Ok(())
}

fn read_workbook(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Reading input file {path:?}"))
}

fn write_json<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if path == Path::new("-") {
        serde_json::to_writer_pretty(std::io::stdout().lock(), records)
            .context("Writing records to stdout")?;
        println!();
    } else {
        let file = fs::File::create(path)
            .with_context(|| format!("Creating output file {path:?}"))?;
        serde_json::to_writer_pretty(file, records)
            .with_context(|| format!("Writing records to {path:?}"))?;
        info!("Wrote {} record(s) to {path:?}", records.len());
    }
    Ok(())
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Normalize tissue mill quality and costing workbooks",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse the per-shift quality sheet ("DATA") into canonical records
    Quality(ParseArgs),
    /// Parse the daily costing workbook into canonical records
    Costing(ParseArgs),
    /// List the sheet names contained in a workbook
    Sheets(SheetsArgs),
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Input workbook (.xlsx or .xls)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Write the normalized records as JSON to this path ('-' for stdout)
    #[arg(long)]
    pub json: Option<PathBuf>,
    /// Render a preview table of the newest records to stdout
    #[arg(long)]
    pub preview: bool,
    /// Number of rows shown by --preview
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct SheetsArgs {
    /// Input workbook (.xlsx or .xls)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
}

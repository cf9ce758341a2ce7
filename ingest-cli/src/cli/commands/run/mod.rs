//! Run command arguments

pub mod handler;

use std::path::PathBuf;

use clap::Args;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Source spreadsheet (.xlsx, .xlsm, .xls, .ods or .csv)
    pub file: PathBuf,

    /// Built-in job name (see `ingest-cli jobs`)
    #[arg(long)]
    pub job: Option<String>,

    /// TOML mapping file describing the job
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Worksheet to read (workbook sources only, defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Destination connection string (defaults to $DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

//! Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ingest-cli",
    about = "Append spreadsheet rows to a PostgreSQL table",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a spreadsheet into its destination table
    Run(commands::run::RunArgs),
    /// List the built-in ingest jobs
    Jobs,
}

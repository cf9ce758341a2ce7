//! Run command handler

use anyhow::{Result, bail};
use colored::*;

use super::RunArgs;
use crate::config;
use crate::ingest::{self, IngestJob};

/// Handle the run command
pub async fn handle_run_command(args: RunArgs) -> Result<()> {
    // Validate arguments
    if args.job.is_none() && args.mapping.is_none() {
        bail!("Either provide --job with a built-in name or --mapping with a TOML mapping file");
    }
    if args.job.is_some() && args.mapping.is_some() {
        bail!("Cannot specify both --job and --mapping");
    }

    let mut job = match (&args.job, &args.mapping) {
        (Some(name), None) => IngestJob::builtin(name).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown job '{}'. Run `ingest-cli jobs` to list the built-in jobs.",
                name
            )
        })?,
        (None, Some(path)) => IngestJob::from_toml_path(path)?,
        _ => unreachable!("Validation above ensures exactly one of job or mapping is present"),
    };
    if let Some(sheet) = args.sheet {
        job.sheet = Some(sheet);
    }

    let database_url = config::database_url(args.database_url)?;

    let report = ingest::ingest(&args.file, &job, &database_url).await?;
    log::debug!("destination received {} columns", report.columns);

    println!(
        "{} appended {} rows to {}",
        "OK".green().bold(),
        report.rows_appended,
        report.table.cyan()
    );
    Ok(())
}

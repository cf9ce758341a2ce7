//! Jobs command handler

use anyhow::Result;
use colored::*;

use crate::ingest::IngestJob;

/// List the built-in ingest jobs
pub fn handle_jobs_command() -> Result<()> {
    println!("Built-in ingest jobs:");
    for (name, job) in IngestJob::builtins() {
        let constants = if job.constants.is_empty() {
            String::new()
        } else {
            format!(", {} constant column(s)", job.constants.len())
        };
        println!(
            "  {:<12} -> table {} ({} renamed columns{})",
            name.cyan(),
            job.table.bold(),
            job.rename.len(),
            constants
        );
    }
    Ok(())
}

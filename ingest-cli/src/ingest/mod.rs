//! Spreadsheet-to-table ingestion
//!
//! One linear operation: load a tabular file, rename its columns to the
//! destination schema, fill in constant columns, and bulk-append the
//! rows to a PostgreSQL table. No retries, no deduplication, no partial
//! success reporting.

pub mod dataset;
pub mod error;
pub mod job;
pub mod sink;
pub mod source;
pub mod transform;

use std::path::Path;

pub use dataset::{ColumnType, Dataset, Value};
pub use error::IngestError;
pub use job::IngestJob;

/// Outcome of a successful ingestion
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Destination table
    pub table: String,
    /// Rows the destination reports appended
    pub rows_appended: u64,
    /// Destination column count after the transform
    pub columns: usize,
}

/// Run one ingestion end to end
///
/// Fails before any database interaction if the source cannot be read
/// or the job transform is invalid; a source with zero data rows
/// succeeds without opening a connection.
pub async fn ingest(
    source_path: &Path,
    job: &IngestJob,
    database_url: &str,
) -> Result<IngestReport, IngestError> {
    let mut dataset = source::load_dataset(source_path, job.sheet.as_deref())?;
    log::debug!(
        "loaded {} rows x {} columns from {}",
        dataset.row_count(),
        dataset.column_count(),
        source_path.display()
    );

    transform::apply_job(&mut dataset, job)?;

    if dataset.rows.is_empty() {
        log::info!(
            "{} has no data rows, nothing to append to {}",
            source_path.display(),
            job.table
        );
        return Ok(IngestReport {
            table: job.table.clone(),
            rows_appended: 0,
            columns: dataset.column_count(),
        });
    }

    let rows_appended = sink::postgres::append(database_url, &job.table, &dataset).await?;
    log::info!(
        "appended {} rows ({} columns) to {}",
        rows_appended,
        dataset.column_count(),
        job.table
    );

    Ok(IngestReport {
        table: job.table.clone(),
        rows_appended,
        columns: dataset.column_count(),
    })
}

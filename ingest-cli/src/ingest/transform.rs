//! Column rename and constant fill

use std::collections::{BTreeMap, HashSet};

use super::dataset::{Dataset, Value};
use super::error::IngestError;
use super::job::IngestJob;

/// Apply a job's column transform to a loaded dataset
///
/// Renames run first, then constants; a transform that would leave two
/// destination columns with the same name is rejected before any
/// database interaction.
pub fn apply_job(dataset: &mut Dataset, job: &IngestJob) -> Result<(), IngestError> {
    rename_columns(dataset, &job.rename);
    apply_constants(dataset, &job.constants);
    ensure_unique_columns(dataset)
}

/// Rename header columns in place
///
/// Unmapped columns pass through unchanged; map keys absent from the
/// header are silently ignored.
pub fn rename_columns(dataset: &mut Dataset, rename: &BTreeMap<String, String>) {
    for column in &mut dataset.columns {
        if let Some(target) = rename.get(column) {
            *column = target.clone();
        }
    }
}

/// Assign constant columns to every row
///
/// A constant whose name matches an existing column overwrites that
/// column's values; otherwise a new column is appended.
pub fn apply_constants(dataset: &mut Dataset, constants: &BTreeMap<String, Value>) {
    for (name, value) in constants {
        match dataset.column_index(name) {
            Some(idx) => {
                for row in &mut dataset.rows {
                    row[idx] = value.clone();
                }
            }
            None => {
                dataset.columns.push(name.clone());
                for row in &mut dataset.rows {
                    row.push(value.clone());
                }
            }
        }
    }
}

fn ensure_unique_columns(dataset: &Dataset) -> Result<(), IngestError> {
    let mut seen = HashSet::new();
    for column in &dataset.columns {
        if !seen.insert(column.as_str()) {
            return Err(IngestError::Job(format!(
                "duplicate destination column \"{column}\" after renaming"
            )));
        }
    }
    Ok(())
}

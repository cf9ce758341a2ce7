//! Ingest job definitions
//!
//! A job names the destination table and describes the column transform:
//! a rename map applied to the source header and constant columns added
//! to every row. Jobs are either built in (the two historical loads) or
//! read from a TOML mapping file:
//!
//! ```toml
//! table = "da_users"
//! # sheet = "Sheet1"
//!
//! [rename]
//! "Region" = "region"
//! "contactNumber" = "contactnumber"
//!
//! [constants]
//! total_collected_data = 0
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::dataset::Value;
use super::error::IngestError;

/// One spreadsheet-to-table ingestion, minus the source path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestJob {
    /// Destination table (must already exist)
    pub table: String,
    /// Worksheet to read; None means the first sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    /// Source column -> destination column
    #[serde(default)]
    pub rename: BTreeMap<String, String>,
    /// Constant columns assigned to every row after renaming
    #[serde(default)]
    pub constants: BTreeMap<String, Value>,
}

impl IngestJob {
    /// Create a job with no renames or constants
    pub fn new(table: impl Into<String>) -> Self {
        IngestJob {
            table: table.into(),
            sheet: None,
            rename: BTreeMap::new(),
            constants: BTreeMap::new(),
        }
    }

    /// Add a rename entry
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.rename.insert(from.into(), to.into());
        self
    }

    /// Add a constant column
    pub fn constant(mut self, column: impl Into<String>, value: Value) -> Self {
        self.constants.insert(column.into(), value);
        self
    }

    /// Resolve a built-in job by name
    pub fn builtin(name: &str) -> Option<IngestJob> {
        match name {
            "da-users" | "da_users" => Some(da_users()),
            "woreda-reps" | "woreda_reps" => Some(woreda_reps()),
            _ => None,
        }
    }

    /// All built-in jobs with their canonical names
    pub fn builtins() -> Vec<(&'static str, IngestJob)> {
        vec![("da-users", da_users()), ("woreda-reps", woreda_reps())]
    }

    /// Load a job from a TOML mapping file
    pub fn from_toml_path(path: &Path) -> Result<IngestJob, IngestError> {
        let text = fs::read_to_string(path).map_err(|e| IngestError::file_read(path, e))?;
        let job: IngestJob = toml::from_str(&text).map_err(|e| {
            IngestError::Job(format!(
                "failed to parse mapping file {}: {}",
                path.display(),
                e
            ))
        })?;
        if job.table.trim().is_empty() {
            return Err(IngestError::Job(format!(
                "mapping file {} must set a destination table",
                path.display()
            )));
        }
        Ok(job)
    }
}

/// Development Agent roster load
fn da_users() -> IngestJob {
    IngestJob::new("da_users")
        .rename("Region", "region")
        .rename("Zone", "zone")
        .rename("Woreda", "woreda")
        .rename("Kebele", "kebele")
        .rename("contactNumber", "contactnumber")
        .rename("Reporting manager_name", "reporting_manager_name")
        .rename("Reporting manager_mobile", "reporting_manager_mobile")
        .constant("total_collected_data", Value::Int(0))
}

/// Woreda representative roster load
fn woreda_reps() -> IngestJob {
    IngestJob::new("woreda_reps")
        .rename("Woreda Representative name", "name")
        .rename("Woreda Representative Phone number", "phone_number")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_da_users() {
        let job = IngestJob::builtin("da-users").unwrap();
        assert_eq!(job.table, "da_users");
        assert_eq!(job.rename.get("Region").map(String::as_str), Some("region"));
        assert_eq!(
            job.rename.get("contactNumber").map(String::as_str),
            Some("contactnumber")
        );
        assert_eq!(
            job.constants.get("total_collected_data"),
            Some(&Value::Int(0))
        );
    }

    #[test]
    fn test_builtin_woreda_reps() {
        let job = IngestJob::builtin("woreda-reps").unwrap();
        assert_eq!(job.table, "woreda_reps");
        assert_eq!(
            job.rename
                .get("Woreda Representative Phone number")
                .map(String::as_str),
            Some("phone_number")
        );
        assert!(job.constants.is_empty());
    }

    #[test]
    fn test_builtin_unknown() {
        assert!(IngestJob::builtin("nope").is_none());
    }

    #[test]
    fn test_parse_mapping_toml() {
        let job: IngestJob = toml::from_str(
            r#"
            table = "custom"
            sheet = "Data"

            [rename]
            "Old Name" = "new_name"

            [constants]
            source = "import"
            batch = 3
            "#,
        )
        .unwrap();

        assert_eq!(job.table, "custom");
        assert_eq!(job.sheet.as_deref(), Some("Data"));
        assert_eq!(
            job.rename.get("Old Name").map(String::as_str),
            Some("new_name")
        );
        assert_eq!(
            job.constants.get("source"),
            Some(&Value::String("import".into()))
        );
        assert_eq!(job.constants.get("batch"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_parse_mapping_defaults() {
        let job: IngestJob = toml::from_str("table = \"t\"").unwrap();
        assert!(job.sheet.is_none());
        assert!(job.rename.is_empty());
        assert!(job.constants.is_empty());
    }
}

//! Ingestion error taxonomy
//!
//! Every variant is fatal; nothing in the pipeline retries or recovers.
//! Messages carry whatever the underlying file or database layer said.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file missing, unreadable, or not parseable as tabular data
    #[error("failed to read source file {}: {}", .path.display(), .message)]
    FileRead { path: PathBuf, message: String },

    /// Invalid job definition (unknown built-in, bad mapping file, bad
    /// table identifier, duplicate destination columns)
    #[error("invalid ingest job: {0}")]
    Job(String),

    /// Destination unreachable, credentials rejected, table missing, or
    /// any other database failure surfaced mid-transfer
    #[error("database operation failed: {message}")]
    Connection { message: String },

    /// Destination rejected the transformed column set
    #[error("destination table \"{table}\" rejected the dataset schema: {message}")]
    SchemaMismatch { table: String, message: String },
}

impl IngestError {
    pub fn file_read(path: &Path, err: impl Display) -> Self {
        IngestError::FileRead {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn connection(err: impl Display) -> Self {
        IngestError::Connection {
            message: err.to_string(),
        }
    }

    pub fn schema_mismatch(table: impl Into<String>, err: impl Display) -> Self {
        IngestError::SchemaMismatch {
            table: table.into(),
            message: err.to_string(),
        }
    }
}

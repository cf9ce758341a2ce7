//! Tabular source loading
//!
//! Dispatches on file extension: `.csv` goes through the csv reader,
//! everything else is handed to calamine, whose own format sniffing
//! rejects non-workbook input.

pub mod csv;
pub mod xlsx;

use std::path::Path;

use super::dataset::Dataset;
use super::error::IngestError;

/// Load the full dataset from a spreadsheet file
pub fn load_dataset(path: &Path, sheet: Option<&str>) -> Result<Dataset, IngestError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        csv::load_csv(path)
    } else {
        xlsx::load_workbook(path, sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_is_file_read_error() {
        let path = PathBuf::from("/nonexistent/ingest-source.csv");
        let err = load_dataset(&path, None).unwrap_err();
        assert!(matches!(err, IngestError::FileRead { .. }));

        let path = PathBuf::from("/nonexistent/ingest-source.xlsx");
        let err = load_dataset(&path, None).unwrap_err();
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}

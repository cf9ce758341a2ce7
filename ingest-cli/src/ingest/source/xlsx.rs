//! Workbook source reader (xlsx/xlsm/xls/ods via calamine)

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{DateTime, Utc};

use crate::ingest::dataset::{Dataset, Value};
use crate::ingest::error::IngestError;

/// Load a workbook sheet with a header row
///
/// Reads the named sheet when given, the first sheet otherwise.
pub fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<Dataset, IngestError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::file_read(path, e))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestError::file_read(path, "workbook contains no sheets"))?,
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        IngestError::file_read(path, format!("failed to read sheet \"{sheet_name}\": {e}"))
    })?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| {
        IngestError::file_read(path, format!("sheet \"{sheet_name}\" has no header row"))
    })?;

    // Keep columns with non-empty textual headers
    let mut kept = Vec::new();
    let mut columns = Vec::new();
    for (idx, cell) in header.iter().enumerate() {
        if let Data::String(s) = cell {
            let name = s.trim();
            if !name.is_empty() {
                kept.push(idx);
                columns.push(name.to_string());
            }
        }
    }
    if columns.is_empty() {
        return Err(IngestError::file_read(
            path,
            format!("sheet \"{sheet_name}\" has no usable header row"),
        ));
    }

    let mut dataset = Dataset::new(columns);
    for row in rows {
        let cells: Vec<Value> = kept
            .iter()
            .map(|&idx| row.get(idx).map(cell_to_value).unwrap_or(Value::Null))
            .collect();
        if cells.iter().all(Value::is_null) {
            continue;
        }
        dataset.push_row(cells);
    }

    Ok(dataset)
}

/// Convert a calamine cell to a dataset value
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) => match s.to_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(s.clone()),
        },
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => {
            // Excel stores most numbers as floats; keep whole ones integral
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Value::Int(*f as i64)
            } else {
                Value::Float(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Value::DateTime(naive.and_utc()),
            None => Value::Null,
        },
        Data::DateTimeIso(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Value::DateTime(dt.with_timezone(&Utc)),
            Err(_) => Value::String(s.clone()),
        },
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

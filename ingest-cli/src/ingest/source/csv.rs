//! CSV source reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::Reader;

use crate::ingest::dataset::{Dataset, Value};
use crate::ingest::error::IngestError;

/// Load a CSV file with a header row
pub fn load_csv(path: &Path) -> Result<Dataset, IngestError> {
    let file = File::open(path).map_err(|e| IngestError::file_read(path, e))?;
    read_csv(file).map_err(|message| IngestError::FileRead {
        path: path.to_path_buf(),
        message,
    })
}

fn read_csv<R: Read>(input: R) -> Result<Dataset, String> {
    let mut reader = Reader::from_reader(input);

    let headers = reader.headers().map_err(|e| e.to_string())?.clone();
    let mut kept = Vec::new();
    let mut columns = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        let name = header.trim();
        if !name.is_empty() {
            kept.push(idx);
            columns.push(name.to_string());
        }
    }
    if columns.is_empty() {
        return Err("no usable header row".to_string());
    }

    let mut dataset = Dataset::new(columns);
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        let cells: Vec<Value> = kept
            .iter()
            .map(|&idx| record.get(idx).map(sniff_value).unwrap_or(Value::Null))
            .collect();
        if cells.iter().all(Value::is_null) {
            continue;
        }
        dataset.push_row(cells);
    }

    Ok(dataset)
}

/// Zero-padded or '+'-prefixed digit runs are phone-number shaped and
/// must stay text ("0911" is not 911).
fn looks_like_padded_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.")
}

/// Infer a cell value from raw CSV text
fn sniff_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if trimmed.starts_with('+') || looks_like_padded_number(trimmed) {
        return Value::String(trimmed.to_string());
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Float(f);
    }
    Value::String(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_csv_basic() {
        let input = "name,age,active\nAbebe,34,true\nKebede,41,false\n";
        let dataset = read_csv(Cursor::new(input)).unwrap();

        assert_eq!(dataset.columns, vec!["name", "age", "active"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows[0][0], Value::String("Abebe".into()));
        assert_eq!(dataset.rows[0][1], Value::Int(34));
        assert_eq!(dataset.rows[0][2], Value::Bool(true));
    }

    #[test]
    fn test_read_csv_header_only() {
        let dataset = read_csv(Cursor::new("name,phone\n")).unwrap();
        assert_eq!(dataset.columns, vec!["name", "phone"]);
        assert_eq!(dataset.row_count(), 0);
    }

    #[test]
    fn test_read_csv_skips_blank_rows_and_empty_headers() {
        let input = "name,,phone\nAbebe,junk,0911\n,,\n";
        let dataset = read_csv(Cursor::new(input)).unwrap();

        assert_eq!(dataset.columns, vec!["name", "phone"]);
        assert_eq!(dataset.row_count(), 1);
        assert_eq!(dataset.rows[0][1], Value::String("0911".into()));
    }

    #[test]
    fn test_read_csv_ragged_row_is_error() {
        let input = "a,b\n1,2,3\n";
        assert!(read_csv(Cursor::new(input)).is_err());
    }

    #[test]
    fn test_sniff_value_keeps_phone_numbers_textual() {
        assert_eq!(sniff_value("0911"), Value::String("0911".into()));
        assert_eq!(sniff_value("+251911"), Value::String("+251911".into()));
    }

    #[test]
    fn test_sniff_value_scalars() {
        assert_eq!(sniff_value(""), Value::Null);
        assert_eq!(sniff_value("  "), Value::Null);
        assert_eq!(sniff_value("0"), Value::Int(0));
        assert_eq!(sniff_value("-17"), Value::Int(-17));
        assert_eq!(sniff_value("0.5"), Value::Float(0.5));
        assert_eq!(sniff_value("TRUE"), Value::Bool(true));
        assert_eq!(sniff_value("Addis"), Value::String("Addis".into()));
    }
}

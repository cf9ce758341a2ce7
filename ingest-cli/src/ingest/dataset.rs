//! In-memory tabular dataset

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scalar cell value
///
/// Untagged so that TOML/JSON literals in mapping files deserialize
/// directly (`0` -> Int, `true` -> Bool, `"x"` -> String).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty cell
    Null,
    /// Boolean
    Bool(bool),
    /// Whole number
    Int(i64),
    /// Floating point
    Float(f64),
    /// Date and time (RFC 3339 string form)
    DateTime(DateTime<Utc>),
    /// Text
    String(String),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as float (integers widen)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get as timestamp
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Render any non-null value as text
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::DateTime(dt) => Some(dt.to_rfc3339()),
            Value::String(s) => Some(s.clone()),
        }
    }
}

/// Postgres bind type for a destination column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Int,
    Float,
    Bool,
    Timestamp,
}

impl ColumnType {
    /// Natural type of a single value, None for nulls
    pub fn of(value: &Value) -> Option<ColumnType> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(ColumnType::Bool),
            Value::Int(_) => Some(ColumnType::Int),
            Value::Float(_) => Some(ColumnType::Float),
            Value::DateTime(_) => Some(ColumnType::Timestamp),
            Value::String(_) => Some(ColumnType::Text),
        }
    }

    /// Combine two observed types into one bindable column type
    ///
    /// Int and Float widen to Float; any other disagreement falls back
    /// to Text, which every value can render into.
    pub fn unify(self, other: ColumnType) -> ColumnType {
        match (self, other) {
            (a, b) if a == b => a,
            (ColumnType::Int, ColumnType::Float) | (ColumnType::Float, ColumnType::Int) => {
                ColumnType::Float
            }
            _ => ColumnType::Text,
        }
    }
}

/// An ordered header plus row-major cell data
///
/// Every row holds exactly `columns.len()` cells; the loaders pad or
/// drop trailing cells to keep that invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column names, in source order
    pub columns: Vec<String>,
    /// Data rows
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create an empty dataset with the given header
    pub fn new(columns: Vec<String>) -> Self {
        Dataset {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a data row
    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Infer a bind type per column by unifying its non-null cells
    ///
    /// All-null columns bind as Text.
    pub fn column_types(&self) -> Vec<ColumnType> {
        (0..self.columns.len())
            .map(|idx| {
                self.rows
                    .iter()
                    .filter_map(|row| ColumnType::of(&row[idx]))
                    .reduce(ColumnType::unify)
                    .unwrap_or(ColumnType::Text)
            })
            .collect()
    }
}

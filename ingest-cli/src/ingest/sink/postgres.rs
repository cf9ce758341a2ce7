//! PostgreSQL bulk append
//!
//! Builds multi-row INSERT statements with `QueryBuilder::push_values`,
//! chunked to stay under the bind-parameter limit, and runs every chunk
//! inside one transaction so a mid-transfer failure leaves nothing
//! behind. No conflict handling: running the same ingestion twice
//! appends the dataset twice.

use regex::Regex;
use sqlx::postgres::PgPoolOptions;
use sqlx::query_builder::Separated;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::ingest::dataset::{ColumnType, Dataset, Value};
use crate::ingest::error::IngestError;

/// Hard Postgres limit on bind parameters per statement
const MAX_BIND_PARAMS: usize = 65_535;
/// Cap on rows per INSERT even for narrow datasets
const MAX_ROWS_PER_INSERT: usize = 1_000;

/// Append every dataset row to an existing table
///
/// Returns the number of rows the destination reports inserted.
pub async fn append(database_url: &str, table: &str, dataset: &Dataset) -> Result<u64, IngestError> {
    if !is_valid_table_name(table) {
        return Err(IngestError::Job(format!(
            "invalid destination table name \"{table}\""
        )));
    }

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .map_err(|e| IngestError::connection(e))?;

    let result = append_rows(&pool, table, dataset).await;
    pool.close().await;
    result
}

async fn append_rows(pool: &PgPool, table: &str, dataset: &Dataset) -> Result<u64, IngestError> {
    let types = dataset.column_types();
    let occupied = occupied_columns(dataset);
    let names: Vec<String> = occupied
        .iter()
        .map(|&idx| dataset.columns[idx].clone())
        .collect();
    let prefix = insert_prefix(table, &names);
    let batch = rows_per_statement(occupied.len());

    let mut tx = pool.begin().await.map_err(|e| classify(table, e))?;
    let mut appended = 0u64;
    for chunk in dataset.rows.chunks(batch) {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(prefix.as_str());
        builder.push_values(chunk, |mut b, row| {
            for &idx in &occupied {
                push_bind(&mut b, &row[idx], types[idx]);
            }
        });
        let result = builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| classify(table, e))?;
        appended += result.rows_affected();
    }
    tx.commit().await.map_err(|e| classify(table, e))?;

    log::debug!(
        "appended {} rows to {} in {} statement batches",
        appended,
        table,
        dataset.rows.len().div_ceil(batch)
    );
    Ok(appended)
}

fn push_bind(b: &mut Separated<'_, '_, Postgres, &'static str>, value: &Value, ty: ColumnType) {
    match ty {
        ColumnType::Bool => {
            b.push_bind(value.as_bool());
        }
        ColumnType::Int => {
            b.push_bind(value.as_int());
        }
        ColumnType::Float => {
            b.push_bind(value.as_float());
        }
        ColumnType::Timestamp => {
            b.push_bind(value.as_timestamp());
        }
        ColumnType::Text => {
            b.push_bind(value.as_text());
        }
    }
}

/// Map a database failure onto the ingest taxonomy
///
/// 42703 (undefined column) and 42804 (datatype mismatch) mean the
/// transformed dataset does not fit the destination schema; everything
/// else, including 42P01 (undefined table), surfaces as a connection
/// level failure with the destination's own message.
fn classify(table: &str, err: sqlx::Error) -> IngestError {
    if let sqlx::Error::Database(db) = &err {
        match db.code().as_deref() {
            Some("42703") | Some("42804") => {
                return IngestError::schema_mismatch(table, db.message());
            }
            Some(_) | None => return IngestError::connection(db.message()),
        }
    }
    IngestError::connection(err)
}

/// Indexes of columns holding at least one value
///
/// Columns with no values at all are left out of the INSERT: their bind
/// type cannot be inferred, and omitting them lets the destination
/// apply its own default (usually NULL) whatever the column's type is.
fn occupied_columns(dataset: &Dataset) -> Vec<usize> {
    (0..dataset.column_count())
        .filter(|&idx| dataset.rows.iter().any(|row| !row[idx].is_null()))
        .collect()
}

fn is_valid_table_name(name: &str) -> bool {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
        .map(|re| re.is_match(name))
        .unwrap_or(false)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn insert_prefix(table: &str, columns: &[String]) -> String {
    let cols = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {} ({}) ", quote_ident(table), cols)
}

fn rows_per_statement(column_count: usize) -> usize {
    if column_count == 0 {
        return 1;
    }
    (MAX_BIND_PARAMS / column_count).clamp(1, MAX_ROWS_PER_INSERT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_validation() {
        assert!(is_valid_table_name("da_users"));
        assert!(is_valid_table_name("_t2"));
        assert!(!is_valid_table_name("da users"));
        assert!(!is_valid_table_name("users; drop table x"));
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("1users"));
    }

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("region"), "\"region\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_insert_prefix() {
        let columns = vec!["name".to_string(), "phone_number".to_string()];
        assert_eq!(
            insert_prefix("woreda_reps", &columns),
            "INSERT INTO \"woreda_reps\" (\"name\", \"phone_number\") "
        );
    }

    #[test]
    fn test_rows_per_statement_respects_param_limit() {
        assert_eq!(rows_per_statement(10), 1_000);
        assert_eq!(rows_per_statement(100), 655);
        assert_eq!(rows_per_statement(70_000), 1);
        assert_eq!(rows_per_statement(0), 1);
    }

    #[test]
    fn test_occupied_columns_skips_fully_null_columns() {
        let mut dataset = Dataset::new(vec!["a".into(), "empty".into(), "c".into()]);
        dataset.push_row(vec![Value::Int(1), Value::Null, Value::Null]);
        dataset.push_row(vec![Value::Null, Value::Null, Value::String("x".into())]);

        assert_eq!(occupied_columns(&dataset), vec![0, 2]);
    }

    #[test]
    fn test_push_values_renders_placeholders() {
        let mut dataset = Dataset::new(vec!["name".into(), "total".into()]);
        dataset.push_row(vec![Value::String("Abebe".into()), Value::Int(0)]);
        dataset.push_row(vec![Value::String("Kebede".into()), Value::Int(0)]);

        let types = dataset.column_types();
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(insert_prefix("da_users", &dataset.columns).as_str());
        builder.push_values(&dataset.rows, |mut b, row| {
            for (value, ty) in row.iter().zip(&types) {
                push_bind(&mut b, value, *ty);
            }
        });

        assert_eq!(
            builder.sql(),
            "INSERT INTO \"da_users\" (\"name\", \"total\") VALUES ($1, $2), ($3, $4)"
        );
    }
}

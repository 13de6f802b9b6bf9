//! SQL text for exports.
//!
//! Table and column names cannot be bound as parameters, so they are checked
//! against a plain-identifier grammar before being placed in SQL text. The
//! partition value is always bound positionally (`$1`), which both
//! PostgreSQL and SQLite accept.

use crate::error_handling::ExportError;

use super::types::ExportRequest;

/// Checks that `name` is a plain SQL identifier, optionally schema-qualified.
///
/// Accepts `[A-Za-z_][A-Za-z0-9_]*`, or two of those joined by a single dot.
pub(crate) fn validate_identifier(name: &str) -> Result<(), ExportError> {
    let mut parts = name.split('.');
    let valid = parts.clone().count() <= 2 && parts.all(is_plain_identifier);
    if valid {
        Ok(())
    } else {
        Err(ExportError::Configuration(format!(
            "invalid SQL identifier: {name:?}"
        )))
    }
}

fn is_plain_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Aggregate query for the largest partition value of `table`.
///
/// Yields a single nullable BIGINT: NULL when the table is empty.
pub(crate) fn build_latest_partition_query(
    table: &str,
    partition_column: &str,
) -> Result<String, ExportError> {
    validate_identifier(table)?;
    validate_identifier(partition_column)?;
    Ok(format!(
        "SELECT CAST(MAX({partition_column}) AS BIGINT) FROM {table}"
    ))
}

/// DISTINCT select of the request's columns for one partition value (`$1`).
pub(crate) fn build_partition_query(
    request: &ExportRequest,
    partition_column: &str,
) -> Result<String, ExportError> {
    validate_identifier(&request.table)?;
    validate_identifier(partition_column)?;
    if request.columns.is_empty() {
        return Err(ExportError::Configuration(format!(
            "no columns requested for table {}",
            request.table
        )));
    }
    for column in &request.columns {
        validate_identifier(column.name)?;
    }
    for column in &request.order_by {
        validate_identifier(column)?;
    }

    let projection = request
        .columns
        .iter()
        .map(|c| c.projection())
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!(
        "SELECT DISTINCT {projection} FROM {table} WHERE {partition_column} = $1",
        table = request.table
    );
    if !request.order_by.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&request.order_by.join(", "));
    }
    Ok(sql)
}

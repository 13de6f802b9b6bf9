//! Export types: requests, column definitions and the output document.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scalar kind of an exported column.
///
/// The kind decides how the column is projected in the SELECT list, so every
/// value reaches the record as a JSON-representable scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Whole numbers, selected as 64-bit integers
    Integer,
    /// Character data
    Text,
    /// Native date/time values, rendered as text by the database
    Timestamp,
}

/// A column to export: its name and scalar kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    /// Column name, as it appears in the table and in the output records
    pub name: &'static str,
    /// Scalar kind
    pub kind: ColumnKind,
}

impl Column {
    /// An integer column.
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Integer,
        }
    }

    /// A text column.
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
        }
    }

    /// A date/time column, exported as its textual form.
    pub const fn timestamp(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Timestamp,
        }
    }

    /// SELECT-list expression for this column, aliased back to its name.
    pub(crate) fn projection(&self) -> String {
        let sql_type = match self.kind {
            ColumnKind::Integer => "BIGINT",
            ColumnKind::Text | ColumnKind::Timestamp => "TEXT",
        };
        format!("CAST({name} AS {sql_type}) AS {name}", name = self.name)
    }
}

/// What to export: table, columns, ordering and destination file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRequest {
    /// Source table
    pub table: String,
    /// Columns to select, in output order
    pub columns: Vec<Column>,
    /// Columns to order by
    pub order_by: Vec<String>,
    /// File name inside the exporter's output directory
    pub file_name: String,
}

impl ExportRequest {
    /// Builds a request from its parts.
    pub fn new(
        table: impl Into<String>,
        columns: &[Column],
        order_by: &[&str],
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            columns: columns.to_vec(),
            order_by: order_by.iter().map(|c| c.to_string()).collect(),
            file_name: file_name.into(),
        }
    }
}

/// A JSON export document: provenance metadata plus the exported records.
///
/// Field order here is the key order of the written JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument<R> {
    /// Source table
    pub table: String,
    /// Partition value the records were selected for
    pub most_recent_year: i64,
    /// Number of records in `data`
    pub record_count: usize,
    /// When the document was generated
    pub generated_at: DateTime<Utc>,
    /// Exported records, in query order
    pub data: Vec<R>,
}

impl<R> ExportDocument<R> {
    /// Wraps `data` with its metadata, stamped with the current time.
    pub fn new(table: impl Into<String>, most_recent_year: i64, data: Vec<R>) -> Self {
        Self {
            table: table.into(),
            most_recent_year,
            record_count: data.len(),
            generated_at: Utc::now(),
            data,
        }
    }
}

/// Outcome of one named export within a run.
#[derive(Clone, Debug)]
pub struct ExportSummary {
    /// Export target name (e.g. `hmda_list`)
    pub target: String,
    /// Source table
    pub table: String,
    /// Partition value that was exported
    pub most_recent_year: i64,
    /// Number of records written
    pub record_count: usize,
    /// Path of the written document
    pub path: PathBuf,
}

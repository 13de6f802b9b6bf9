//! Export functionality.
//!
//! This module exports the most recent year of each source table to a JSON
//! document: `{table, most_recent_year, record_count, generated_at, data}`.

mod catalog;
mod exporter;
mod queries;
mod records;
mod types;
mod writer;

pub use catalog::ExportTarget;
pub use exporter::TabularExporter;
pub use records::{ExportRecord, GeographyRecord, LenderRecord};
pub use types::{Column, ColumnKind, ExportDocument, ExportRequest, ExportSummary};
pub use writer::write_json_atomic;

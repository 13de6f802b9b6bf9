//! Tabular exporter.
//!
//! Finds the most recent partition of a table, selects the distinct rows of
//! that partition into typed records, and writes them as a JSON document.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::DEFAULT_PARTITION_COLUMN;
use crate::error_handling::ExportError;
use crate::storage::DbPool;

use super::queries::{build_latest_partition_query, build_partition_query};
use super::records::ExportRecord;
use super::types::{ExportDocument, ExportRequest};
use super::writer::write_json_atomic;

/// Exports partitioned tables from one database into one output directory.
///
/// The exporter borrows the connection; it holds no state between calls.
pub struct TabularExporter<'a> {
    pool: &'a DbPool,
    output_dir: PathBuf,
    partition_column: String,
}

impl<'a> TabularExporter<'a> {
    /// Creates an exporter writing into `output_dir`, partitioned by `year`.
    pub fn new(pool: &'a DbPool, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            output_dir: output_dir.into(),
            partition_column: DEFAULT_PARTITION_COLUMN.to_string(),
        }
    }

    /// Uses `column` as the partition column instead of `year`.
    pub fn with_partition_column(mut self, column: impl Into<String>) -> Self {
        self.partition_column = column.into();
        self
    }

    /// Directory documents are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the largest partition value in `table`, or `fallback` if it has none.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Query` if the table does not exist or the
    /// partition column cannot be aggregated, `ExportError::Connection` if the
    /// database is unreachable.
    pub async fn latest_partition(&self, table: &str, fallback: i64) -> Result<i64, ExportError> {
        let sql = build_latest_partition_query(table, &self.partition_column)?;
        debug!("{sql}");

        let latest: Option<i64> = sqlx::query_scalar(&sql)
            .fetch_one(self.pool)
            .await
            .map_err(|e| ExportError::from_query(table, e))?;

        match latest {
            Some(value) => Ok(value),
            None => {
                info!("{table} has no {} values, using {fallback}", self.partition_column);
                Ok(fallback)
            }
        }
    }

    /// Exports the rows of `request.table` whose partition equals `partition_value`.
    ///
    /// Rows are selected DISTINCT, ordered by `request.order_by`, decoded into
    /// `R` and written to `<output_dir>/<request.file_name>`, replacing any
    /// previous file. A partition with no rows produces a document with an
    /// empty `data` array.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Query` on query or decode failures (nothing is
    /// written in that case) and `ExportError::Io` if the document cannot be
    /// written.
    pub async fn export<R: ExportRecord>(
        &self,
        request: &ExportRequest,
        partition_value: i64,
    ) -> Result<ExportDocument<R>, ExportError> {
        let sql = build_partition_query(request, &self.partition_column)?;
        debug!("{sql} [$1 = {partition_value}]");

        let data: Vec<R> = sqlx::query_as(&sql)
            .bind(partition_value)
            .fetch_all(self.pool)
            .await
            .map_err(|e| ExportError::from_query(&request.table, e))?;

        let document = ExportDocument::new(request.table.clone(), partition_value, data);

        let path = self.output_dir.join(&request.file_name);
        write_json_atomic(&path, &document)?;
        info!("Saved {} rows → {}", document.record_count, path.display());

        Ok(document)
    }

    /// Exports the most recent partition of `request.table`.
    ///
    /// Shorthand for [`latest_partition`](Self::latest_partition) followed by
    /// [`export`](Self::export).
    pub async fn export_latest<R: ExportRecord>(
        &self,
        request: &ExportRequest,
        fallback: i64,
    ) -> Result<ExportDocument<R>, ExportError> {
        let year = self.latest_partition(&request.table, fallback).await?;
        self.export(request, year).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::records::GeographyRecord;
    use crate::export::types::Column;
    use crate::storage::connect;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    async fn test_pool(dir: &TempDir) -> DbPool {
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        connect(&url).await.expect("Failed to create test database")
    }

    async fn exec(pool: &DbPool, sql: &str) {
        sqlx::query(sql)
            .execute(pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to run {sql}: {e}"));
    }

    async fn create_census_table(pool: &DbPool) {
        exec(
            pool,
            "CREATE TABLE census_us (
                year INTEGER, state TEXT, county TEXT, geoid TEXT, statecountyid TEXT,
                msa TEXT, msa_number TEXT, st TEXT, town TEXT, tract_number TEXT
            )",
        )
        .await;
    }

    async fn insert_census(pool: &DbPool, year: i64, state: &str, county: &str, town: &str) {
        exec(
            pool,
            &format!(
                "INSERT INTO census_us VALUES \
                 ({year}, '{state}', '{county}', '39049', '39049', 'Columbus', '18140', 'OH', '{town}', '0001.00')"
            ),
        )
        .await;
    }

    fn geographies_request() -> ExportRequest {
        ExportRequest::new(
            "census_us",
            GeographyRecord::COLUMNS,
            &["state", "county", "town"],
            "geographies.json",
        )
    }

    #[tokio::test]
    async fn test_latest_partition_returns_maximum() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;
        create_census_table(&pool).await;
        insert_census(&pool, 2022, "Ohio", "Franklin", "Columbus").await;
        insert_census(&pool, 2024, "Ohio", "Franklin", "Columbus").await;
        insert_census(&pool, 2023, "Ohio", "Franklin", "Columbus").await;
        exec(&pool, "INSERT INTO census_us (year, state) VALUES (NULL, 'Ohio')").await;

        let exporter = TabularExporter::new(&pool, dir.path());
        assert_eq!(exporter.latest_partition("census_us", 1999).await.unwrap(), 2024);
    }

    #[tokio::test]
    async fn test_latest_partition_falls_back_on_empty_table() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;
        create_census_table(&pool).await;

        let exporter = TabularExporter::new(&pool, dir.path());
        assert_eq!(exporter.latest_partition("census_us", 2024).await.unwrap(), 2024);
        assert_eq!(exporter.latest_partition("census_us", 1990).await.unwrap(), 1990);
    }

    #[tokio::test]
    async fn test_export_selects_only_requested_year_in_order() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;
        create_census_table(&pool).await;
        insert_census(&pool, 2024, "Texas", "Travis", "Austin").await;
        insert_census(&pool, 2024, "Ohio", "Franklin", "Worthington").await;
        insert_census(&pool, 2024, "Ohio", "Franklin", "Columbus").await;
        insert_census(&pool, 2023, "Alabama", "Jefferson", "Birmingham").await;
        // Duplicate row collapses under DISTINCT
        insert_census(&pool, 2024, "Ohio", "Franklin", "Columbus").await;

        let out = dir.path().join("out");
        let exporter = TabularExporter::new(&pool, &out);
        let doc: ExportDocument<GeographyRecord> =
            exporter.export(&geographies_request(), 2024).await.unwrap();

        assert_eq!(doc.table, "census_us");
        assert_eq!(doc.most_recent_year, 2024);
        assert_eq!(doc.record_count, 3);
        assert_eq!(doc.record_count, doc.data.len());
        assert!(doc.data.iter().all(|r| r.year == 2024));

        let towns: Vec<_> = doc.data.iter().map(|r| r.town.as_deref().unwrap()).collect();
        assert_eq!(towns, vec!["Columbus", "Worthington", "Austin"]);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("geographies.json")).unwrap())
                .unwrap();
        assert_eq!(written["record_count"], 3);
        assert_eq!(written["most_recent_year"], 2024);
        assert_eq!(written["data"][0]["tract_number"], "0001.00");
    }

    #[tokio::test]
    async fn test_export_empty_partition_writes_empty_document() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;
        create_census_table(&pool).await;
        insert_census(&pool, 2023, "Ohio", "Franklin", "Columbus").await;

        let exporter = TabularExporter::new(&pool, dir.path());
        let doc: ExportDocument<GeographyRecord> =
            exporter.export(&geographies_request(), 2030).await.unwrap();

        assert_eq!(doc.record_count, 0);
        assert!(doc.data.is_empty());
        assert!(dir.path().join("geographies.json").exists());
    }

    #[tokio::test]
    async fn test_export_missing_table_is_query_error_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;

        let out = dir.path().join("out");
        let exporter = TabularExporter::new(&pool, &out);
        let request = ExportRequest::new(
            "no_such_table",
            GeographyRecord::COLUMNS,
            &["state"],
            "missing.json",
        );

        let err = exporter
            .export_latest::<GeographyRecord>(&request, 2024)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Query { .. }), "got {err:?}");
        assert!(!out.join("missing.json").exists());
    }

    #[tokio::test]
    async fn test_rerun_is_identical_apart_from_timestamp() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;
        create_census_table(&pool).await;
        insert_census(&pool, 2024, "Ohio", "Franklin", "Columbus").await;
        insert_census(&pool, 2024, "Texas", "Travis", "Austin").await;

        let exporter = TabularExporter::new(&pool, dir.path());
        let path = dir.path().join("geographies.json");
        let strip_timestamp = |text: String| -> String {
            text.lines()
                .filter(|line| !line.trim_start().starts_with("\"generated_at\""))
                .collect::<Vec<_>>()
                .join("\n")
        };

        exporter
            .export_latest::<GeographyRecord>(&geographies_request(), 2024)
            .await
            .unwrap();
        let first = strip_timestamp(std::fs::read_to_string(&path).unwrap());

        exporter
            .export_latest::<GeographyRecord>(&geographies_request(), 2024)
            .await
            .unwrap();
        let second = strip_timestamp(std::fs::read_to_string(&path).unwrap());

        assert_eq!(first, second);
    }

    #[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
    struct SnapshotRecord {
        snapshot: i64,
        loaded_on: Option<String>,
    }

    impl ExportRecord for SnapshotRecord {
        const COLUMNS: &'static [Column] =
            &[Column::integer("snapshot"), Column::timestamp("loaded_on")];
    }

    #[tokio::test]
    async fn test_custom_partition_column_and_timestamp_column() {
        let dir = TempDir::new().unwrap();
        let pool = test_pool(&dir).await;
        exec(&pool, "CREATE TABLE loads (snapshot INTEGER, loaded_on DATE)").await;
        exec(&pool, "INSERT INTO loads VALUES (7, '2024-06-30'), (8, '2024-07-31')").await;

        let exporter = TabularExporter::new(&pool, dir.path()).with_partition_column("snapshot");
        let request = ExportRequest::new("loads", SnapshotRecord::COLUMNS, &[], "loads.json");
        let doc: ExportDocument<SnapshotRecord> =
            exporter.export_latest(&request, 0).await.unwrap();

        assert_eq!(doc.most_recent_year, 8);
        assert_eq!(doc.data.len(), 1);
        assert_eq!(doc.data[0].loaded_on.as_deref(), Some("2024-07-31"));
    }
}

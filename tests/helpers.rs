// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::Path;

use geo_export::{connect, DbPool};

/// Connection string for a SQLite database file inside `dir`, created on first use.
pub fn sqlite_url(dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", dir.join("source.db").display())
}

/// Opens a connection to the test database in `dir`.
pub async fn create_test_pool(dir: &Path) -> DbPool {
    connect(&sqlite_url(dir))
        .await
        .expect("Failed to create test database pool")
}

/// Runs a single statement, panicking with the SQL on failure.
pub async fn exec(pool: &DbPool, sql: &str) {
    sqlx::query(sql)
        .execute(pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to run {sql}: {e}"));
}

/// Creates the three lender directory tables and the census table.
pub async fn create_source_tables(pool: &DbPool) {
    for table in ["hmda_us", "cra_disc", "branch_us"] {
        exec(
            pool,
            &format!(
                "CREATE TABLE {table} (
                    year INTEGER, lender TEXT, lender_id TEXT, regulator TEXT, lender_state TEXT
                )"
            ),
        )
        .await;
    }
    exec(
        pool,
        "CREATE TABLE census_us (
            year INTEGER, state TEXT, county TEXT, geoid TEXT, statecountyid TEXT,
            msa TEXT, msa_number TEXT, st TEXT, town TEXT, tract_number TEXT
        )",
    )
    .await;
}

/// Inserts a lender row.
#[allow(dead_code)] // Used by other test files
pub async fn insert_lender(pool: &DbPool, table: &str, year: i64, lender: &str, id: &str) {
    exec(
        pool,
        &format!("INSERT INTO {table} VALUES ({year}, '{lender}', '{id}', 'OCC', 'OH')"),
    )
    .await;
}

/// Inserts a census geography row.
#[allow(dead_code)] // Used by other test files
pub async fn insert_geography(
    pool: &DbPool,
    year: i64,
    state: &str,
    county: &str,
    town: &str,
    tract: &str,
) {
    exec(
        pool,
        &format!(
            "INSERT INTO census_us VALUES \
             ({year}, '{state}', '{county}', '00000', '00000', NULL, NULL, 'XX', '{town}', '{tract}')"
        ),
    )
    .await;
}

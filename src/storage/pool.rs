//! Database connection management.
//!
//! Exports run over a single connection held for the whole run. The pool is
//! capped at one connection and created through sqlx's `Any` driver, so the
//! same code serves PostgreSQL in production and SQLite locally.

use log::{debug, error, info};
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;

use crate::error_handling::ExportError;

/// Connection handle shared by the exporter.
pub type DbPool = AnyPool;

/// Opens the run's database connection.
///
/// # Errors
///
/// Returns `ExportError::Connection` if the database cannot be reached.
pub async fn connect(database_url: &str) -> Result<DbPool, ExportError> {
    install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            ExportError::Connection(e)
        })?;

    info!("Database connection established.");
    Ok(pool)
}

/// Runs `body` with an open connection and closes it afterwards.
///
/// The connection is closed whether `body` succeeds or fails, before the
/// result is handed back to the caller.
pub async fn with_connection<T, E, F, Fut>(database_url: &str, body: F) -> Result<T, E>
where
    E: From<ExportError>,
    F: FnOnce(DbPool) -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let pool = connect(database_url).await?;
    let result = body(pool.clone()).await;
    pool.close().await;
    debug!("Database connection closed.");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_connect_to_sqlite_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("t.db").display());
        let pool = connect(&url).await.expect("Failed to connect");
        let one: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to run query");
        assert_eq!(one, 1);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_unreachable_database_is_connection_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        // mode=ro refuses to create the missing file
        let url = format!("sqlite://{}?mode=ro", dir.path().join("missing.db").display());
        let result = connect(&url).await;
        assert!(matches!(result, Err(ExportError::Connection(_))));
    }

    #[tokio::test]
    async fn test_with_connection_closes_on_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("t.db").display());

        let mut seen: Option<DbPool> = None;
        let result: Result<(), ExportError> = with_connection(&url, |pool| {
            seen = Some(pool);
            async { Err(ExportError::Configuration("boom".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(ExportError::Configuration(_))));
        assert!(seen.expect("body should run").is_closed());
    }
}

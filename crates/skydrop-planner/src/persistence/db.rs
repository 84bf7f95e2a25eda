//! Database connection and schema setup.

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Database connection wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Open the planner database at `db_path`, creating the file and its parent
/// directory on first use, and bring the schema up to date.
pub async fn init_database(db_path: &str, max_connections: u32) -> Result<Database> {
    if let Some(parent) = Path::new(db_path).parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory for {}", db_path))?;
    }

    info!(path = db_path, "Opening planner database");
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .with_context(|| format!("Failed to open database {}", db_path))?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to apply planner schema")?;
    info!(migrations = MIGRATOR.iter().count(), "Planner schema ready");

    Ok(Database { pool })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_database_creates_tables() {
        let db = init_database(":memory:", 1).await.unwrap();

        for table in ["orders", "order_details", "deliveries", "flightpath"] {
            let result: (i32,) = sqlx::query_as(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            )
            .bind(table)
            .fetch_one(db.pool())
            .await
            .unwrap();
            assert_eq!(result.0, 1, "missing table {}", table);
        }
    }

    #[tokio::test]
    async fn test_schema_setup_is_idempotent() {
        let db = init_database(":memory:", 1).await.unwrap();
        MIGRATOR.run(db.pool()).await.unwrap();
    }

    #[tokio::test]
    async fn test_reopening_a_file_database_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("skydrop.db");
        let path = path.to_str().unwrap();

        let db = init_database(path, 1).await.unwrap();
        sqlx::query("INSERT INTO deliveries VALUES ('0a1b2c3d', 'army.monks.grapes', 1150)")
            .execute(db.pool())
            .await
            .unwrap();
        db.pool().close().await;

        let reopened = init_database(path, 1).await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM deliveries")
            .fetch_one(reopened.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }
}

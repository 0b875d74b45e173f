use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// DbConnection owns the SQLite pool shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and set up the schema
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {}", url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Self::setup_schema(&pool).await?;
        info!(url = %url, "Database ready");

        Ok(Self { pool })
    }

    /// Initialize a private in-memory database for tests.
    ///
    /// A single connection that never expires keeps the memory database alive
    /// for the lifetime of the pool.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection; used on shutdown
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // AUTOINCREMENT so that ids of deleted students are never handed out again
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                roll_no TEXT NOT NULL,
                gender TEXT NOT NULL,
                math_score INTEGER NOT NULL CHECK (math_score BETWEEN 0 AND 100),
                reading_score INTEGER NOT NULL CHECK (reading_score BETWEEN 0 AND 100),
                writing_score INTEGER NOT NULL CHECK (writing_score BETWEEN 0 AND 100),
                attendance INTEGER NOT NULL CHECK (attendance BETWEEN 0 AND 100),
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create students table")?;

        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_students_roll_no
            ON students (roll_no COLLATE NOCASE);
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create roll number index")?;

        Ok(())
    }
}

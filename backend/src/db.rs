use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:availability.db";

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // One row per (person, date); absence means available
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS availability (
                person_id TEXT NOT NULL,
                date TEXT NOT NULL,
                status TEXT NOT NULL,
                PRIMARY KEY (person_id, date)
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Store the status for one (person, date).
    /// This will overwrite any existing status for the same date.
    pub async fn upsert_availability(
        &self,
        person_id: &str,
        date: &str,
        status: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO availability (person_id, date, status) VALUES (?, ?, ?)",
        )
        .bind(person_id)
        .bind(date)
        .bind(status)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    /// All (date, status) rows stored for a person, earliest date first
    pub async fn list_availability(&self, person_id: &str) -> Result<Vec<(String, String)>> {
        let rows =
            sqlx::query("SELECT date, status FROM availability WHERE person_id = ? ORDER BY date")
                .bind(person_id)
                .fetch_all(&*self.pool)
                .await?;

        let records = rows
            .iter()
            .map(|row| (row.get("date"), row.get("status")))
            .collect();
        Ok(records)
    }
}

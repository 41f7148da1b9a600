pub mod repository;
pub mod sqlite;

use sqlx::SqlitePool;

use crate::error::Result;

pub enum DatabasePool {
    Sqlite(SqlitePool),
}

impl DatabasePool {
    /// Create a new SQLite database pool from a connection string and create
    /// the schema if it does not exist yet.
    pub async fn new_sqlite(connect_str: &str) -> Result<Self> {
        let pool = SqlitePool::connect(connect_str).await?;
        Self::run_migrations(&pool).await?;
        Ok(DatabasePool::Sqlite(pool))
    }

    /// Create a new in-memory SQLite database pool. Useful for testing.
    pub async fn new_sqlite_memory() -> Result<Self> {
        let pool = SqlitePool::connect(":memory:").await?;
        Self::run_migrations(&pool).await?;
        Ok(DatabasePool::Sqlite(pool))
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        let migrations: &[&str] = &[include_str!("../../migrations/001_students.sql")];

        for migration_sql in migrations {
            for statement in migration_sql.split(';') {
                let trimmed = statement.trim();
                if !trimmed.is_empty() {
                    sqlx::query(trimmed).execute(pool).await?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_pool_creates_schema() {
        let pool = DatabasePool::new_sqlite_memory().await.unwrap();
        let DatabasePool::Sqlite(p) = pool;
        // The students table must exist and be empty.
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&p)
            .await
            .unwrap();
        assert_eq!(row.0, 0);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = DatabasePool::new_sqlite_memory().await.unwrap();
        let DatabasePool::Sqlite(p) = pool;
        DatabasePool::run_migrations(&p).await.unwrap();
        DatabasePool::run_migrations(&p).await.unwrap();
    }
}

//! Schema for the credential store

use common::error::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::info;

/// Users table. Email uniqueness is enforced here so concurrent sign-ups
/// for the same address cannot both succeed.
pub const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL,
    name TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#;

/// Create the tables if they do not exist yet
pub async fn migrate(pool: &SqlitePool) -> DatabaseResult<()> {
    info!("Applying database schema");

    sqlx::raw_sql(CREATE_SCHEMA)
        .execute(pool)
        .await
        .map_err(DatabaseError::Migration)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::database::{DatabaseConfig, init_pool};

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let pool = init_pool(&DatabaseConfig::new("sqlite::memory:", 1))
            .await
            .unwrap();

        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'users'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }
}

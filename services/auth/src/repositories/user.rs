//! User repository for database operations

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::models::{NewUser, User};

/// Credential store failures
#[derive(Debug, Error)]
pub enum UserStoreError {
    /// The unique index rejected the email
    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user whose password has already been hashed
    ///
    /// Duplicate detection relies on the unique index alone, so two racing
    /// inserts for one email resolve to exactly one success.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, UserStoreError> {
        info!("Creating new user: {}", new_user.email);

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password_hash)
            VALUES (?, ?, ?)
            RETURNING id, email, name, password_hash, created_at
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(UserStoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find a user by exact email match
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

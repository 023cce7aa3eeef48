//! Error types shared by the services
//!
//! Database failures are grouped by the stage that produced them so callers
//! can log a precise cause while exposing a generic failure to clients.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error raised while opening, probing or migrating the database
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred while opening the pool
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred while creating the schema
    #[error("Database migration error: {0}")]
    Migration(#[source] SqlxError),

    /// The connection string could not be understood
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

//! Authentication service for the study platform
//!
//! Registration, login, logout and "who am I" over HTTP. Passwords are
//! hashed with Argon2, sessions are HS256 JWTs carried in an `HttpOnly`
//! cookie, and users live in SQLite.
//!
//! Everything is wired from one [`AppConfig`](crate::config::AppConfig):
//!
//! ```rust,no_run
//! use auth::{AppState, config::AppConfig, routes::create_router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let state = AppState::initialize(&config).await?;
//!     let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//!     axum::serve(listener, create_router(state)).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod validation;

use anyhow::Result;
use common::database::{health_check, init_pool};
use sqlx::SqlitePool;
use tracing::info;

use crate::{
    config::AppConfig, jwt::JwtService, middleware::OriginPolicy, repositories::UserRepository,
    session::SessionCookie,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub session_cookie: SessionCookie,
    pub origin_policy: OriginPolicy,
}

impl AppState {
    /// Assemble the state around an existing pool whose schema is in place
    pub fn new(config: &AppConfig, db_pool: SqlitePool) -> Self {
        AppState {
            jwt_service: JwtService::new(&config.jwt_secret),
            user_repository: UserRepository::new(db_pool.clone()),
            session_cookie: SessionCookie::new(config.cookie_secure),
            origin_policy: OriginPolicy::new(&config.allowed_origins),
            db_pool,
        }
    }

    /// Open the database, apply the schema and build the state
    pub async fn initialize(config: &AppConfig) -> Result<Self> {
        let pool = init_pool(&config.database).await?;

        if health_check(&pool).await? {
            info!("Database connection successful");
        } else {
            anyhow::bail!("Failed to connect to database");
        }

        database::migrate(&pool).await?;

        Ok(Self::new(config, pool))
    }
}

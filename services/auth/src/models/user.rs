//! User model and its public projection

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// User entity as stored in the credential store
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// New user creation payload; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// The identity fields a client is allowed to see
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

impl From<crate::jwt::Claims> for UserProfile {
    fn from(claims: crate::jwt::Claims) -> Self {
        UserProfile {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

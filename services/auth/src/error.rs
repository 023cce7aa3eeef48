//! HTTP-facing error type for the authentication service
//!
//! Every handler failure ends up as one of these variants. The body only ever
//! contains a fixed message; underlying causes are logged where they occur.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed request input
    #[error("{0}")]
    Validation(String),

    /// Email already registered
    #[error("Email is already registered")]
    Conflict,

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No session, or a session token that failed verification for any reason
    #[error("Authentication required")]
    Unauthenticated,

    /// Request from a browser origin outside the allow-list
    #[error("Origin not allowed")]
    OriginNotAllowed,

    /// Storage or hashing failure
    #[error("Internal server error")]
    InternalServerError,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::OriginNotAllowed => StatusCode::FORBIDDEN,
            AuthError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

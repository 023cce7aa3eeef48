//! Authentication service routes

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use common::database;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{
    AppState,
    error::{AuthError, AuthResult},
    middleware::origin_guard,
    models::{NewUser, UserProfile},
    password,
    repositories::UserStoreError,
    validation::{LoginRequest, SignUpRequest, json_body},
};

/// Path prefix of the authentication endpoints
pub const AUTH_PREFIX: &str = "/api/auth";

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/sign-up", post(sign_up))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me));

    let cors = state.origin_policy.cors_layer();

    Router::new()
        .route("/health", get(health_check))
        .nest(AUTH_PREFIX, auth_routes)
        .layer(cors)
        .layer(middleware::from_fn_with_state(state.clone(), origin_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint, reporting whether the database answers
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match database::health_check(&state.db_pool).await {
        Ok(true) => (StatusCode::OK, Json(json!({ "ok": true }))),
        Ok(false) | Err(_) => {
            warn!("Health check failed: database unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "ok": false })))
        }
    }
}

/// Registration endpoint
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse> {
    let request = json_body(payload)?.validate()?;
    info!("Sign-up attempt for: {}", request.email);

    let password_hash = password::hash_password(request.password)
        .await
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            AuthError::InternalServerError
        })?;

    let new_user = NewUser {
        email: request.email,
        name: request.name,
        password_hash,
    };

    let user = state
        .user_repository
        .create(&new_user)
        .await
        .map_err(|e| match e {
            UserStoreError::DuplicateEmail => {
                info!("Sign-up rejected, email already registered: {}", new_user.email);
                AuthError::Conflict
            }
            UserStoreError::Database(e) => {
                error!("Failed to create user: {}", e);
                AuthError::InternalServerError
            }
        })?;

    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(UserProfile::from(&user))))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse> {
    let request = json_body(payload)?.validate()?;
    info!("Login attempt for: {}", request.email);

    let user = state
        .user_repository
        .find_by_email(&request.email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            AuthError::InternalServerError
        })?;

    let Some(user) = user else {
        password::verify_dummy(request.password).await.map_err(|e| {
            error!("Failed to verify password: {}", e);
            AuthError::InternalServerError
        })?;
        return Err(AuthError::InvalidCredentials);
    };

    let verified = password::verify_password(user.password_hash.clone(), request.password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            AuthError::InternalServerError
        })?;

    if !verified {
        return Err(AuthError::InvalidCredentials);
    }

    let token = state.jwt_service.sign(&user).map_err(|e| {
        error!("Failed to sign session token: {}", e);
        AuthError::InternalServerError
    })?;

    info!("User {} logged in", user.id);
    let jar = state.session_cookie.attach(jar, token);

    Ok((jar, Json(UserProfile::from(&user))))
}

/// Logout endpoint
///
/// Clears the cookie only; the token itself stays valid until it expires.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = state.session_cookie.clear(jar);

    (jar, Json(json!({ "ok": true })))
}

/// Current session endpoint
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> AuthResult<Json<UserProfile>> {
    let token = state
        .session_cookie
        .extract(&jar)
        .ok_or(AuthError::Unauthenticated)?;

    let claims = state.jwt_service.verify(&token).map_err(|e| {
        info!("Rejected session token: {}", e);
        AuthError::Unauthenticated
    })?;

    Ok(Json(UserProfile::from(claims)))
}

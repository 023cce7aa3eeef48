//! Cross-origin policy
//!
//! Browsers on an allowed origin may send credentialed requests; the CORS
//! headers echo their exact origin. Requests carrying any other `Origin` are
//! refused before reaching a handler. Requests without an `Origin` header
//! (curl, server-to-server) pass through untouched.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request, header},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::{AppState, error::AuthError};

/// Allowed browser origins, checked by exact string match
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed: Vec<HeaderValue>,
}

impl OriginPolicy {
    /// Build the policy; wildcards and origins that are not valid header
    /// values are skipped
    pub fn new(origins: &[String]) -> Self {
        let allowed = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) if origin != "*" => Some(value),
                _ => {
                    warn!("Ignoring invalid allowed origin: {}", origin);
                    None
                }
            })
            .collect();

        Self { allowed }
    }

    /// `None` (no `Origin` header) is always allowed
    pub fn allows(&self, origin: Option<&HeaderValue>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed.iter().any(|allowed| allowed == origin),
        }
    }

    /// CORS layer echoing the request origin for allowed origins only
    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.allowed.clone()))
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Reject requests whose `Origin` is not on the allow-list
pub async fn origin_guard(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let origin = req.headers().get(header::ORIGIN);

    if !state.origin_policy.allows(origin) {
        warn!(
            "Rejected request from origin {:?} to {}",
            origin,
            req.uri().path()
        );
        return Err(AuthError::OriginNotAllowed);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> OriginPolicy {
        OriginPolicy::new(&[
            "https://study.example.com".to_string(),
            "http://localhost:5173".to_string(),
        ])
    }

    #[test]
    fn test_no_origin_is_allowed() {
        assert!(policy().allows(None));
    }

    #[test]
    fn test_listed_origin_is_allowed() {
        let origin = HeaderValue::from_static("https://study.example.com");
        assert!(policy().allows(Some(&origin)));
    }

    #[test]
    fn test_unlisted_origin_is_rejected() {
        for origin in [
            "https://evil.example.com",
            "https://study.example.com.evil.com",
            "http://study.example.com",
            "http://localhost:5174",
            "null",
        ] {
            let value = HeaderValue::from_static(origin);
            assert!(!policy().allows(Some(&value)), "{} should be rejected", origin);
        }
    }

    #[test]
    fn test_invalid_origins_are_skipped() {
        let policy = OriginPolicy::new(&[
            "https://ok.example.com".to_string(),
            "bad\norigin".to_string(),
            "*".to_string(),
        ]);

        assert_eq!(policy.allowed.len(), 1);
    }
}

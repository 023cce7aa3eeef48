//! Request bodies and their validation
//!
//! Fields are optional at the serde level so a missing field is reported as
//! a validation error instead of a deserialization failure. Values are used
//! exactly as sent: no trimming, no case folding.

use axum::{Json, extract::rejection::JsonRejection};
use serde::Deserialize;
use tracing::info;

use crate::error::AuthError;

/// Body of `POST /sign-up`
#[derive(Debug, Default, Deserialize)]
pub struct SignUpRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Body of `POST /login`
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A sign-up request with every field present
#[derive(Debug, Clone, PartialEq)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// A login request with every field present
#[derive(Debug, Clone, PartialEq)]
pub struct Login {
    pub email: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(self) -> Result<SignUp, AuthError> {
        match (non_empty(self.email), non_empty(self.password), non_empty(self.name)) {
            (Some(email), Some(password), Some(name)) => Ok(SignUp {
                email,
                password,
                name,
            }),
            _ => Err(AuthError::Validation(
                "Email, password and name are required".to_string(),
            )),
        }
    }
}

impl LoginRequest {
    pub fn validate(self) -> Result<Login, AuthError> {
        match (non_empty(self.email), non_empty(self.password)) {
            (Some(email), Some(password)) => Ok(Login { email, password }),
            _ => Err(AuthError::Validation(
                "Email and password are required".to_string(),
            )),
        }
    }
}

/// Unwrap a JSON body, turning any extractor rejection into a 400
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        info!("Rejected request body: {}", rejection.body_text());
        AuthError::Validation("Request body must be a JSON object".to_string())
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(email: Option<&str>, password: Option<&str>, name: Option<&str>) -> SignUpRequest {
        SignUpRequest {
            email: email.map(String::from),
            password: password.map(String::from),
            name: name.map(String::from),
        }
    }

    #[test]
    fn test_sign_up_valid() {
        let validated = sign_up(Some("a@x.com"), Some("secret123"), Some("Ann"))
            .validate()
            .unwrap();

        assert_eq!(
            validated,
            SignUp {
                email: "a@x.com".to_string(),
                password: "secret123".to_string(),
                name: "Ann".to_string(),
            }
        );
    }

    #[test]
    fn test_sign_up_missing_or_empty_fields() {
        let cases = [
            sign_up(None, Some("secret123"), Some("Ann")),
            sign_up(Some("a@x.com"), None, Some("Ann")),
            sign_up(Some("a@x.com"), Some("secret123"), None),
            sign_up(Some(""), Some("secret123"), Some("Ann")),
            sign_up(Some("a@x.com"), Some(""), Some("Ann")),
            sign_up(Some("a@x.com"), Some("secret123"), Some("")),
            SignUpRequest::default(),
        ];

        for case in cases {
            assert!(matches!(case.validate(), Err(AuthError::Validation(_))));
        }
    }

    #[test]
    fn test_values_are_not_normalized() {
        let validated = sign_up(Some(" A@X.com "), Some(" pw "), Some("Ann"))
            .validate()
            .unwrap();

        assert_eq!(validated.email, " A@X.com ");
        assert_eq!(validated.password, " pw ");
    }

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest {
            email: Some("a@x.com".to_string()),
            password: Some("secret123".to_string()),
        };
        assert!(ok.validate().is_ok());

        let missing = LoginRequest {
            email: Some("a@x.com".to_string()),
            password: None,
        };
        assert!(matches!(missing.validate(), Err(AuthError::Validation(_))));
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"pw","remember":true}"#).unwrap();

        assert_eq!(request.email.as_deref(), Some("a@x.com"));
        assert_eq!(request.password.as_deref(), Some("pw"));
    }
}

//! Argon2 password hashing
//!
//! Hashes are PHC strings with the salt embedded, so nothing besides the
//! hash itself needs to be stored. Both operations are CPU heavy and run on
//! the blocking thread pool.

use std::sync::OnceLock;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use thiserror::Error;
use tokio::task;

/// Password hashing failures
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Hashing task failed: {0}")]
    Task(#[from] task::JoinError),
}

/// Hash a plaintext password with a fresh random salt
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    task::spawn_blocking(move || hash_password_blocking(&password)).await?
}

/// Check a plaintext password against a stored hash
///
/// A stored value that is not a valid PHC string counts as a mismatch.
pub async fn verify_password(hash: String, password: String) -> Result<bool, PasswordError> {
    Ok(task::spawn_blocking(move || verify_password_blocking(&hash, &password)).await?)
}

/// Burn the same verification cost as a real check, always failing.
///
/// Used when the email is unknown so both login failures take equally long.
pub async fn verify_dummy(password: String) -> Result<bool, PasswordError> {
    task::spawn_blocking(move || {
        if let Some(hash) = dummy_hash() {
            let _ = verify_password_blocking(hash, &password);
        }
        false
    })
    .await
    .map_err(PasswordError::from)
}

fn hash_password_blocking(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut rand::thread_rng());

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

fn verify_password_blocking(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password_blocking("dummy-password-never-matches").ok())
        .as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("secret123".to_string()).await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(hash.clone(), "secret123".to_string()).await.unwrap());
        assert!(!verify_password(hash, "secret124".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_different_hashes() {
        let hash1 = hash_password("same_password".to_string()).await.unwrap();
        let hash2 = hash_password("same_password".to_string()).await.unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);

        assert!(verify_password(hash1, "same_password".to_string()).await.unwrap());
        assert!(verify_password(hash2, "same_password".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_mismatch() {
        assert!(!verify_password("mock_hash".to_string(), "anything".to_string()).await.unwrap());
        assert!(!verify_password(String::new(), String::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_dummy_never_matches() {
        assert!(!verify_dummy("dummy-password-never-matches".to_string()).await.unwrap());
    }
}

//! Persistence for authentication data

pub mod user;

pub use user::{UserRepository, UserStoreError};

//! Error types for the startdash core

use thiserror::Error;

use crate::collaborators::CollaboratorError;
use crate::config::ConfigError;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can surface from the core library
#[derive(Debug, Error)]
pub enum Error {
    /// Credential or settings storage failed
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Setup input was rejected
    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    /// Configuration could not be loaded or saved
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// An external collaborator (app lister, media session) failed
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Failures of the file-backed stores
///
/// These never reach the login flow: `CredentialStore::verify` and
/// `CredentialStore::is_set` translate them into `false`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Failed to hash secret: {0}")]
    Hash(String),

    #[error("Secret store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Setup screen rejections
///
/// Validation variants are shown inline and never touch the lockout policy.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Setup screen is not active")]
    NotActive,

    #[error("Could not save password: {0}")]
    Storage(#[from] StoreError),
}

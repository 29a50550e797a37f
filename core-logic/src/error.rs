//! # Core Error Types
//!
//! Centralized error definitions for the core-logic crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.
//!
//! A rate limit (HTTP 429) is deliberately absent from this module: it is
//! reported through the tagged outcomes in [`crate::sweep`], never as an error.

use thiserror::Error;

/// Unified error type for core-logic operations.
///
/// This enum wraps all specific error types and provides a unified
/// error interface for the application layer.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Credential(CredentialError),

    #[error(transparent)]
    Network(NetworkError),
}

impl From<ConfigError> for CoreError {
    fn from(e: ConfigError) -> Self {
        CoreError::Config(e)
    }
}

impl From<CredentialError> for CoreError {
    fn from(e: CredentialError) -> Self {
        CoreError::Credential(e)
    }
}

impl From<NetworkError> for CoreError {
    fn from(e: NetworkError) -> Self {
        CoreError::Network(e)
    }
}

/// Configuration-related errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Missing required configuration field: '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("No API clients configured")]
    NoClients,
}

/// Keys file errors. All of them are fatal at startup.
#[derive(Error, Debug, Clone)]
pub enum CredentialError {
    #[error("Keys file not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error reading {path}: {msg}")]
    IoError { path: String, msg: String },

    #[error("Malformed key block starting at line {line}: expected 4 lines, got {found}")]
    MalformedBlock { line: usize, found: usize },

    #[error("No credentials found in {path}")]
    Empty { path: String },
}

/// Network and API-related errors
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("Transport error calling {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("HTTP error {status_code} from {endpoint}")]
    HttpError { status_code: u16, endpoint: String },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}

//! Error types for the ONVEST system.

use thiserror::Error;

/// Top-level error type shared by every ONVEST crate.
///
/// Variants map one-to-one onto the HTTP failure classes the server
/// exposes, so lower layers can fail with the right class without
/// knowing anything about HTTP.
#[derive(Debug, Error)]
pub enum OnvestError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Entity already exists (unique constraint).
    #[error("{entity} already exists")]
    AlreadyExists { entity: String },

    /// Authentication failed — the caller could not be identified.
    #[error("{reason}")]
    AuthenticationFailed { reason: String },

    /// Authorization denied — the caller is identified but not allowed.
    #[error("{reason}")]
    AuthorizationDenied { reason: String },

    /// Input validation failed.
    #[error("{message}")]
    Validation { message: String },

    /// Database error.
    #[error("database error: {0}")]
    Database(String),

    /// Document storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Cryptographic operation error.
    #[error("cryptography error: {0}")]
    Crypto(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using [`OnvestError`].
pub type OnvestResult<T> = Result<T, OnvestError>;

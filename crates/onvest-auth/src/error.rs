//! Authentication error types.

use onvest_core::error::OnvestError;
use thiserror::Error;

/// Authentication-layer error type.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login failed. Unknown usernames and wrong passwords produce this
    /// same variant so callers cannot tell them apart.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Signup or login called without both fields.
    #[error("username and password are required")]
    MissingCredentials,

    /// Signup with a username that is already registered.
    #[error("username already exists")]
    UsernameTaken,

    /// Token signature valid but past its expiry.
    #[error("token expired")]
    TokenExpired,

    /// Token failed validation.
    #[error("invalid token: {0}")]
    TokenInvalid(String),

    /// Key loading, hashing, or signing failure.
    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for OnvestError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => OnvestError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::MissingCredentials => OnvestError::Validation {
                message: err.to_string(),
            },
            AuthError::UsernameTaken => OnvestError::AlreadyExists {
                entity: "username".into(),
            },
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                OnvestError::AuthorizationDenied {
                    reason: err.to_string(),
                }
            }
            AuthError::Crypto(msg) => OnvestError::Crypto(msg),
        }
    }
}

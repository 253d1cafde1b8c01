//! ONVEST Auth — password authentication and JWT handling.
//!
//! Provides Argon2id password hashing, EdDSA-signed access tokens, and
//! the [`AuthService`] orchestrating signup, login, and token
//! verification over any [`onvest_core::repository::UserRepository`].

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginOutput};
pub use token::{AccessTokenClaims, ValidatedClaims};

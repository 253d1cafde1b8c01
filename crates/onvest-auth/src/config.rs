//! Authentication configuration.

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// PEM-encoded Ed25519 private key used to sign access tokens.
    pub jwt_private_key_pem: String,
    /// PEM-encoded Ed25519 public key used to verify access tokens.
    pub jwt_public_key_pem: String,
    /// Access token lifetime in seconds (default: 3600 = 1 hour).
    pub token_lifetime_secs: u64,
    /// Value of the `iss` claim in issued tokens.
    pub jwt_issuer: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_private_key_pem: String::new(),
            jwt_public_key_pem: String::new(),
            token_lifetime_secs: 3600,
            jwt_issuer: "onvest".to_string(),
        }
    }
}

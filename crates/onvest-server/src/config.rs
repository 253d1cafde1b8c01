//! Server configuration, assembled from environment variables.

use std::env;

use onvest_auth::AuthConfig;
use onvest_db::DbConfig;

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, host:port.
    pub bind: String,
    /// Directory uploaded documents are written to.
    pub uploads_dir: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Read configuration from `ONVEST_*` environment variables,
    /// falling back to development defaults. The JWT key pair has no
    /// default; startup rejects an empty one.
    pub fn from_env() -> Self {
        let db = DbConfig {
            url: env_or("ONVEST_DB_URL", "127.0.0.1:8000"),
            namespace: env_or("ONVEST_DB_NAMESPACE", "onvest"),
            database: env_or("ONVEST_DB_NAME", "main"),
            username: env_or("ONVEST_DB_USER", "root"),
            password: env_or("ONVEST_DB_PASS", "root"),
        };

        let auth = AuthConfig {
            jwt_private_key_pem: env::var("ONVEST_JWT_PRIVATE_KEY_PEM").unwrap_or_default(),
            jwt_public_key_pem: env::var("ONVEST_JWT_PUBLIC_KEY_PEM").unwrap_or_default(),
            token_lifetime_secs: env::var("ONVEST_TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            jwt_issuer: env_or("ONVEST_JWT_ISSUER", "onvest"),
        };

        Self {
            bind: env_or("ONVEST_BIND", "127.0.0.1:3001"),
            uploads_dir: env_or("ONVEST_UPLOADS_DIR", "uploads"),
            db,
            auth,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

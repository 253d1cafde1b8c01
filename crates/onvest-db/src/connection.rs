//! Database connection management.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::error::DbError;

/// Database connection configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SurrealDB endpoint, host:port.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".to_string(),
            namespace: "onvest".to_string(),
            database: "main".to_string(),
            username: "root".to_string(),
            password: "root".to_string(),
        }
    }
}

/// Manages the database connection lifecycle.
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Connect to SurrealDB over WebSocket and select the configured
    /// namespace and database.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!("Connecting to SurrealDB at {}", config.url);

        let db = Surreal::new::<Ws>(&config.url).await?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        db.use_ns(&config.namespace).use_db(&config.database).await?;

        info!(
            "Connected to SurrealDB (ns={}, db={})",
            config.namespace, config.database
        );

        Ok(Self { db })
    }

    /// Access the underlying client.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}

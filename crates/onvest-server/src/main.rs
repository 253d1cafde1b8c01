//! ONVEST server entry point.

use std::sync::Arc;

use onvest_db::DbManager;
use onvest_server::{AppState, ServerConfig, router};
use onvest_workflow::DocumentStore;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("onvest=info".parse()?))
        .json()
        .init();

    let config = ServerConfig::from_env();
    if config.auth.jwt_private_key_pem.is_empty() || config.auth.jwt_public_key_pem.is_empty() {
        return Err("ONVEST_JWT_PRIVATE_KEY_PEM and ONVEST_JWT_PUBLIC_KEY_PEM must be set".into());
    }

    let manager = DbManager::connect(&config.db).await?;
    onvest_db::run_migrations(manager.client()).await?;

    let documents = DocumentStore::new(config.uploads_dir.as_str())?;
    info!("Storing uploaded documents under {}", documents.root().display());
    let state = Arc::new(AppState::new(
        manager.client().clone(),
        config.auth.clone(),
        documents,
    ));

    let listener = TcpListener::bind(&config.bind).await?;
    info!("ONVEST server listening on {}", config.bind);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ONVEST server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

//! Server entry point for the Member Import Engine.

use std::sync::Arc;

use tracing::info;

use member_import::api::{AppState, create_router};
use member_import::config::ImportConfig;
use member_import::store::InMemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = match std::env::var("IMPORT_CONFIG") {
        Ok(path) => {
            info!(path = %path, "loading import configuration");
            ImportConfig::load(path)?
        }
        Err(_) => ImportConfig::default(),
    };

    let state = AppState::new(Arc::new(InMemoryStore::new()), config);
    let router = create_router(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "member import engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}

//! # Server Startup
//!
//! Builds the application state and runs the Axum server.

use ::server::{create_app_router, intelligence::IntelligenceClient, AppState};
use error::{AppError, Result};

/// Bind and serve the API until the process is stopped.
pub async fn run(host: &str, port: u16, db: sea_orm::DbConn) -> Result<()> {
    let intelligence = IntelligenceClient::new(&crate::config::intelligence_config())?;

    let state = AppState {
        db,
        intelligence,
    };

    let app = create_app_router(state);

    let address = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::config(format!("Failed to bind {}: {}", address, e)))?;

    tracing::info!(address = %address, "Deskline API server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/**
 * Server Initialization
 *
 * Builds the application from a loaded `ServerConfig`:
 * 1. Open the database (optional; falls back to in-memory stores)
 * 2. Build the shared services into `AppState`
 * 3. Make sure the upload directory exists
 * 4. Create the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails only if the upload directory cannot be created.
pub async fn create_app(config: &ServerConfig) -> std::io::Result<Router<()>> {
    tracing::info!("Initializing coursehub backend server");

    let db_pool = load_database(config.database_url.as_deref()).await;
    let app_state = AppState::with_pool(config, db_pool);

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tracing::info!("Serving uploads from {}", config.upload_dir.display());

    Ok(create_router(app_state))
}

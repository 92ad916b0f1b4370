/**
 * Router Configuration
 *
 * Combines the API routes, static avatar serving and the cross-cutting
 * layers into a single Axum router.
 *
 * # Layers (outermost first)
 *
 * 1. `TraceLayer` - one span per request
 * 2. `CatchPanicLayer` - a panicking handler answers 500 through the error envelope
 *
 * # Fallback
 *
 * Unknown routes answer `404 {"status": "fail", ...}`.
 */

use axum::{http::Uri, http::StatusCode, Router};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::auth::upload::PUBLIC_PREFIX;
use crate::backend::error::{panic_response, ApiError};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

async fn route_not_found(uri: Uri) -> ApiError {
    tracing::debug!("No route for {}", uri.path());
    ApiError::fail(StatusCode::NOT_FOUND, format!("route {} not found", uri.path()))
}

/// Create the Axum router with all routes configured
///
/// Uploaded avatars are served from the upload directory under
/// `/uploads/<filename>`, matching the stored avatar reference.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    let router = router.nest_service(
        &format!("/{}", PUBLIC_PREFIX),
        ServeDir::new(app_state.uploads.dir()),
    );

    router
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

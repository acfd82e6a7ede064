//! # Routes
//!
//! Axum router configuration for the checkout proxy.

use crate::handlers;
use crate::state::AppState;
use axum::{
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - API:
///   - POST /api/orders - Create an order for the posted cart
///   - POST /api/orders/{order_id}/capture - Capture an approved order
///
/// - Health:
///   - GET /health - Health check
///
/// - Static pages:
///   - GET / - Checkout page (`{client_dir}/checkout.html`)
///   - GET /* - Any other file under `client_dir`, 404 otherwise
pub fn create_router(state: AppState) -> Router {
    let client_dir = state.config.client_dir.clone();
    let checkout_page = state.config.checkout_page();

    // Non-GET requests to client paths fall through to 404, not 405
    let client_assets = ServeDir::new(client_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(handlers::not_found.into_service());

    let api_routes = Router::new()
        .route("/orders", post(handlers::create_order))
        .route("/orders/{order_id}/capture", post(handlers::capture_order));

    Router::new()
        .route("/health", get(handlers::health))
        // Checkout page
        .route_service("/", ServeFile::new(checkout_page))
        // API
        .nest("/api", api_routes)
        // Client assets
        .fallback_service(client_assets)
        // Middleware
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

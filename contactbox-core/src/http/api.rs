//! API routes definition

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all endpoints
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        // Public submission
        .route("/api/contact", post(handlers::submit_contact))
        // Admin routes
        .route("/api/contacts", get(handlers::list_contacts))
        .route("/api/contacts/:id", delete(handlers::delete_contact))
        .fallback(handlers::not_found)
        // The portfolio front-end is served from a different origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        // Switch routes
        .route("/api/switches", get(handlers::switches::list_switches))
        .route("/api/switches", post(handlers::switches::create_switch))
        .route("/api/switches/:id", get(handlers::switches::get_switch))
        .route("/api/switches/:id", put(handlers::switches::update_switch))
        .route("/api/switches/:id", delete(handlers::switches::delete_switch))
        .route("/api/switches/:id/children", get(handlers::switches::list_children))
        .route("/api/switches/:id/ports", get(handlers::switches::list_ports))
        .route("/api/switches/:id/ports/:port_id/uplink", post(handlers::switches::create_child_switch))
        // Port routes
        .route("/api/ports/:id", get(handlers::ports::get_port))
        .route("/api/ports/:id/assign", post(handlers::ports::assign_port))
        .route("/api/ports/:id/assignment", put(handlers::ports::edit_port_assignment))
        .route("/api/ports/:id/unassign", post(handlers::ports::unassign_port))
        // Topology views
        .route("/api/topology/stats", get(handlers::switches::stats))
        .route("/api/topology/search", get(handlers::switches::list_switches))
        // Health
        .route("/api/health", get(handlers::healthcheck))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

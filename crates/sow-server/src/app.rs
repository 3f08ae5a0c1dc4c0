//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/preview", post(handlers::preview::preview))
        .route("/api/export", post(handlers::export::export_pdf))
        .route("/api/templates", get(handlers::templates::list_templates))
        .route("/api/templates", post(handlers::templates::create_template))
        .route("/api/templates/{id}", get(handlers::templates::get_template))
        .route("/api/templates/{id}", put(handlers::templates::update_template))
        .route(
            "/api/templates/{id}",
            delete(handlers::templates::delete_template),
        )
        .route(
            "/api/templates/{id}/duplicate",
            post(handlers::templates::duplicate_template),
        )
        .route("/api/publish", post(handlers::publish::publish))
        .route("/api/published/{id}", get(handlers::publish::published_meta))
        .route(
            "/api/published/{id}",
            delete(handlers::publish::unpublish),
        )
        .route("/api/cleanup", post(handlers::publish::cleanup))
        .route("/p/{id}", get(handlers::publish::view_published));

    Router::new()
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

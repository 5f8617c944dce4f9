//! Limited Edition Tees storefront library.
//!
//! Server-rendered drop page for the monthly tee release. The page's view
//! state lives in a [`coordinator::Coordinator`] persisted in the visitor's
//! session; htmx fragments drive its operations.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod overlay;
pub mod routes;
pub mod state;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the storefront router with its session, request-id and tracing
/// layers.
///
/// Static files and Sentry layers are added by the binary.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}

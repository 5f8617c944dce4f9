//! HTTP route handlers for the drop page.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Drop page (mounts a fresh page-load)
//! GET  /health                    - Health check
//!
//! # Grids (HTMX fragments)
//! GET  /drops?month=YYYY-MM       - Current section + archive grid (out-of-band)
//!
//! # Detail overlay (HTMX fragments)
//! POST /products/{slug}/select    - Open the overlay on a loaded product
//! POST /overlay/dismiss           - Close the overlay
//!
//! # Subscribe (HTMX fragment)
//! POST /subscribe                 - Submit the subscribe form
//! ```

pub mod home;
pub mod newsletter;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::overlay::DISMISS_PATH;
use crate::state::AppState;

/// Create the drop page router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/drops", get(home::drops))
        .route("/products/{slug}/select", post(products::select))
        .route(DISMISS_PATH, post(products::dismiss))
        .route("/subscribe", post(newsletter::subscribe))
}

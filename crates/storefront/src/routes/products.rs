//! Detail overlay route handlers (HTMX).
//!
//! Both return the `#overlay-slot` fragment.

use axum::{
    extract::Path,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::Page;
use crate::overlay::OverlayTemplate;

/// Open the overlay on a product from the loaded lists.
#[instrument(skip(page))]
pub async fn select(mut page: Page, Path(slug): Path<String>) -> Result<Response> {
    let product = page
        .state()
        .find_product(&slug)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    add_breadcrumb("overlay", "Product selected", Some(&[("slug", slug.as_str())]));
    page.coordinator().select_product(product);
    page.save();

    Ok(OverlayTemplate::from_state(page.state()).into_response())
}

/// Close the overlay.
#[instrument(skip(page))]
pub async fn dismiss(mut page: Page) -> Response {
    page.coordinator().dismiss_overlay();
    page.save();

    OverlayTemplate::from_state(page.state()).into_response()
}

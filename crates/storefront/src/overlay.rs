//! Product detail overlay.
//!
//! Stateless: it renders whatever the coordinator says is selected, or
//! nothing. When hidden, the slot it renders into is left empty so no stale
//! dialog or listener survives in the page. The backdrop and the close button
//! both post to [`DISMISS_PATH`]; dismissing twice is harmless.

use askama::Template;
use askama_web::WebTemplate;
use limited_tees_core::Product;

use crate::coordinator::ViewState;

/// Where the backdrop and close button send their dismiss request.
pub const DISMISS_PATH: &str = "/overlay/dismiss";

/// Shown in place of a missing description.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// A visible overlay, with or without a product.
#[derive(Debug, Clone, Copy)]
pub struct DetailOverlay<'a> {
    pub product: Option<&'a Product>,
}

impl<'a> DetailOverlay<'a> {
    /// `None` when the overlay is hidden.
    #[must_use]
    pub fn new(visible: bool, product: Option<&'a Product>) -> Option<Self> {
        visible.then_some(Self { product })
    }

    /// Overlay for the current view state.
    #[must_use]
    pub fn from_state(state: &'a ViewState) -> Option<Self> {
        Self::new(state.overlay_visible, state.selected_product.as_ref())
    }

    /// Dialog title; empty when there is no product.
    #[must_use]
    pub fn title(&self) -> &'a str {
        self.product.map_or("", |p| p.name.as_str())
    }

    /// Body copy for the selected product.
    #[must_use]
    pub fn description(&self) -> &'a str {
        self.product
            .and_then(|p| p.description.as_deref())
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }
}

/// Overlay slot fragment (swapped in by htmx).
#[derive(Template, WebTemplate)]
#[template(path = "partials/overlay.html")]
pub struct OverlayTemplate<'a> {
    pub overlay: Option<DetailOverlay<'a>>,
    pub dismiss_path: &'static str,
}

impl<'a> OverlayTemplate<'a> {
    #[must_use]
    pub fn from_state(state: &'a ViewState) -> Self {
        Self {
            overlay: DetailOverlay::from_state(state),
            dismiss_path: DISMISS_PATH,
        }
    }
}

//! View-state coordinator for the drop page.
//!
//! Owns everything one page-load knows: whether the mount fetch has settled,
//! the two product lists, the overlay selection, and the subscribe form
//! input. Route handlers drive it through the operations below and render
//! from [`Coordinator::state`].
//!
//! # Change notification
//!
//! Every mutating operation bumps a [`tokio::sync::watch`] revision exactly
//! once, after all of its field writes. Subscribers therefore see at most one
//! change per operation and never a half-applied state.
//!
//! # Failure model
//!
//! Read failures (transport, status, decode) never reach the page. Each read
//! is collapsed to an empty list on its own, before the two are joined, so a
//! failing archive read cannot discard a good current-month read or vice
//! versa. Subscription failures surface only as
//! [`Acknowledgement::Failed`].

use std::sync::Arc;

use limited_tees_core::{MonthKey, Product, SubscribeRequest};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::backend::{Backend, BackendError};

/// Shown when the backend accepts a subscription without a message.
pub const DEFAULT_SUBSCRIBED_MESSAGE: &str = "Thanks for subscribing!";

/// Shown for any failed subscription attempt.
pub const SUBSCRIBE_FAILED_MESSAGE: &str = "Subscription failed. Please try again later.";

/// Monotonic counter bumped once per state change.
pub type Revision = u64;

/// Everything the page renders from.
///
/// Invariants:
/// - `overlay_visible` implies `selected_product.is_some()`
/// - while `loading`, both lists are unknown rather than empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// True until the mount fetch settles.
    pub loading: bool,
    /// Month the current list was fetched for.
    pub month: Option<MonthKey>,
    /// This month's drop.
    pub current: Vec<Product>,
    /// Every past drop.
    pub archive: Vec<Product>,
    /// Last product opened in the overlay. Kept after dismissal.
    pub selected_product: Option<Product>,
    /// Whether the detail overlay is open.
    pub overlay_visible: bool,
    /// Subscribe form input.
    pub email_input: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: true,
            month: None,
            current: Vec::new(),
            archive: Vec::new(),
            selected_product: None,
            overlay_visible: false,
            email_input: String::new(),
        }
    }
}

impl ViewState {
    /// Find a loaded product by slug, checking this month's drop first.
    #[must_use]
    pub fn find_product(&self, slug: &str) -> Option<&Product> {
        self.current
            .iter()
            .chain(self.archive.iter())
            .find(|p| p.slug == slug)
    }
}

/// One-shot outcome of a subscribe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgement {
    /// The backend accepted the address.
    Subscribed(String),
    /// Transport, status, or decode failure.
    Failed,
}

impl Acknowledgement {
    /// Text to show the visitor.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Subscribed(message) => message,
            Self::Failed => SUBSCRIBE_FAILED_MESSAGE,
        }
    }

    /// Whether the subscription went through.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Subscribed(_))
    }
}

/// Drives one page-load's [`ViewState`].
pub struct Coordinator {
    backend: Arc<dyn Backend>,
    state: ViewState,
    revision: watch::Sender<Revision>,
}

impl Coordinator {
    /// A freshly mounted page: loading, empty lists, nothing selected.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::restore(backend, ViewState::default())
    }

    /// Resume a page-load from previously saved state.
    #[must_use]
    pub fn restore(backend: Arc<dyn Backend>, state: ViewState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            backend,
            state,
            revision,
        }
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Give up the coordinator and keep its state.
    #[must_use]
    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// Receive a notification after each state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Revision> {
        self.revision.subscribe()
    }

    /// Run the mount fetch for the month the local clock reports.
    pub async fn initialize(&mut self) {
        self.initialize_for(MonthKey::current_local()).await;
    }

    /// Run the mount fetch for `month`.
    ///
    /// Both reads are in flight before either is awaited. Each is collapsed
    /// to an empty list on failure, then both lists are replaced and
    /// `loading` is cleared. Does nothing once the page has loaded.
    ///
    /// Dropping the returned future cancels both reads and leaves the state
    /// untouched.
    pub async fn initialize_for(&mut self, month: MonthKey) {
        if !self.state.loading {
            return;
        }

        let backend = &self.backend;
        let (current, archive) = tokio::join!(
            async { or_empty("current", backend.current_tees(month).await) },
            async { or_empty("archive", backend.archive_tees().await) },
        );

        tracing::debug!(
            %month,
            current = current.len(),
            archive = archive.len(),
            "Drop lists loaded"
        );

        self.state.month = Some(month);
        self.state.current = current;
        self.state.archive = archive;
        self.state.loading = false;
        self.notify();
    }

    /// Open the overlay on `product`. Any product is accepted.
    pub fn select_product(&mut self, product: Product) {
        self.state.selected_product = Some(product);
        self.state.overlay_visible = true;
        self.notify();
    }

    /// Close the overlay. The selection stays so a closing transition can
    /// still render it.
    pub fn dismiss_overlay(&mut self) {
        self.state.overlay_visible = false;
        self.notify();
    }

    /// Replace the subscribe form input.
    pub fn update_email_input(&mut self, text: impl Into<String>) {
        self.state.email_input = text.into();
        self.notify();
    }

    /// Send the current input to the backend's subscribe endpoint.
    ///
    /// The input is cleared whatever the outcome. Concurrent submits are not
    /// guarded against.
    pub async fn submit_subscription(&mut self) -> Acknowledgement {
        let request = SubscribeRequest {
            email: self.state.email_input.clone(),
        };

        let acknowledgement = match self.backend.subscribe(&request).await {
            Ok(response) => Acknowledgement::Subscribed(
                response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_SUBSCRIBED_MESSAGE.to_string()),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "Subscription failed");
                Acknowledgement::Failed
            }
        };

        self.state.email_input.clear();
        self.notify();
        acknowledgement
    }

    fn notify(&self) {
        self.revision.send_modify(|r| *r += 1);
    }
}

/// Collapse a failed read to an empty list, logging the cause.
fn or_empty(list: &'static str, result: Result<Vec<Product>, BackendError>) -> Vec<Product> {
    result.unwrap_or_else(|e| {
        tracing::error!(list, error = %e, "Failed to load drop list");
        Vec::new()
    })
}

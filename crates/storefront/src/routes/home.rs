//! Drop page route handlers.
//!
//! `GET /` mounts a fresh page-load and renders the full page with loading
//! placeholders. The current section then requests `GET /drops`, which runs
//! the mount fetch and swaps in both grids.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use limited_tees_core::MonthKey;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::coordinator::{Acknowledgement, ViewState};
use crate::error::Result;
use crate::filters;
use crate::middleware::Page;
use crate::overlay::{DISMISS_PATH, DetailOverlay};
use crate::state::AppState;

/// One of the "Why Limited" cards.
#[derive(Debug, Clone, Copy)]
pub struct Pillar {
    pub title: &'static str,
    pub body: &'static str,
}

/// Static copy for the "Why Limited" band.
pub const PILLARS: &[Pillar] = &[
    Pillar {
        title: "Authenticity",
        body: "Each drop is designed with intention. No mass-market copies, just original pieces that tell a story.",
    },
    Pillar {
        title: "Collectibility",
        body: "Monthly releases create true rarity. When a batch is gone, it moves to the archive, forever.",
    },
    Pillar {
        title: "Eco-Minded",
        body: "Small runs mean less waste and smarter production. Quality over quantity, always.",
    },
];

/// Full drop page.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub state: &'a ViewState,
    pub month: MonthKey,
    pub oob: bool,
    pub overlay: Option<DetailOverlay<'a>>,
    pub dismiss_path: &'static str,
    pub acknowledgement: Option<Acknowledgement>,
    pub pillars: &'static [Pillar],
}

/// Current section plus the archive grid swapped out-of-band.
#[derive(Template, WebTemplate)]
#[template(path = "partials/drops.html")]
pub struct DropsTemplate<'a> {
    pub state: &'a ViewState,
    pub month: MonthKey,
    pub oob: bool,
}

/// Month shown in the section heading: the one fetched, or the local one
/// while the fetch is pending.
fn heading_month(state: &ViewState) -> MonthKey {
    state.month.unwrap_or_else(MonthKey::current_local)
}

/// Query sent by the current section when it loads.
#[derive(Debug, Deserialize)]
pub struct DropsQuery {
    /// Viewer-local month, `YYYY-MM`.
    pub month: Option<String>,
}

/// Drop page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<Response> {
    let page = Page::mount(&state, session).await?;
    let view = page.state();

    Ok(HomeTemplate {
        state: view,
        month: heading_month(view),
        oob: false,
        overlay: DetailOverlay::from_state(view),
        dismiss_path: DISMISS_PATH,
        acknowledgement: None,
        pillars: PILLARS,
    }
    .into_response())
}

/// Both drop grids, fetched once per page-load (HTMX).
#[instrument(skip(page))]
pub async fn drops(mut page: Page, Query(query): Query<DropsQuery>) -> Response {
    match query.month.as_deref().map(str::parse::<MonthKey>) {
        Some(Ok(month)) => page.coordinator().initialize_for(month).await,
        Some(Err(e)) => {
            tracing::debug!(error = %e, "Ignoring viewer month");
            page.coordinator().initialize().await;
        }
        None => page.coordinator().initialize().await,
    }
    page.save();

    let view = page.state();
    DropsTemplate {
        state: view,
        month: heading_month(view),
        oob: true,
    }
    .into_response()
}

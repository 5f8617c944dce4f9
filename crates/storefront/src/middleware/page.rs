//! Page-load extractor.
//!
//! A visitor's page-load spans several requests (the page itself, the grid
//! fetch, overlay and subscribe fragments). Its [`ViewState`] is kept in a
//! [`PageStore`] slot keyed by a page-load id that lives in the session.
//!
//! [`Page`] holds the slot's lock for the whole request, so requests of one
//! page-load run one at a time: a subscribe that arrives while the grid
//! fetch is still running waits for it and then sees the loaded lists.
//! [`Page::save`] writes the coordinator's state back into the slot when it
//! reports a change.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::FromRequestParts, http::request::Parts};
use moka::future::Cache;
use tokio::sync::{Mutex, OwnedMutexGuard, watch};
use tower_sessions::Session;
use uuid::Uuid;

use crate::coordinator::{Coordinator, Revision, ViewState};
use crate::error::AppError;
use crate::state::AppState;

/// Session key holding the current page-load's id.
pub const PAGE_ID_KEY: &str = "page_id";

/// Upper bound on page-loads held in memory.
const MAX_PAGES: u64 = 100_000;

type Slot = Arc<Mutex<ViewState>>;

/// View states of live page-loads, evicted after an idle period.
#[derive(Clone)]
pub struct PageStore {
    slots: Cache<Uuid, Slot>,
}

impl PageStore {
    /// Store whose page-loads are dropped after `idle` without access.
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        let slots = Cache::builder()
            .max_capacity(MAX_PAGES)
            .time_to_idle(idle)
            .build();
        Self { slots }
    }

    /// The slot for `id`, created fresh if unknown or evicted.
    async fn slot(&self, id: Uuid) -> Slot {
        self.slots
            .get_with(id, async { Arc::new(Mutex::new(ViewState::default())) })
            .await
    }

    async fn forget(&self, id: Uuid) {
        self.slots.invalidate(&id).await;
    }
}

/// The coordinator for the visitor's current page-load.
pub struct Page {
    coordinator: Coordinator,
    changes: watch::Receiver<Revision>,
    slot: OwnedMutexGuard<ViewState>,
}

impl Page {
    /// Start a new page-load, discarding any previous one in the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn mount(state: &AppState, session: Session) -> Result<Self, AppError> {
        if let Some(previous) = session.get::<Uuid>(PAGE_ID_KEY).await? {
            state.pages().forget(previous).await;
        }
        Self::start(state, &session).await
    }

    /// Resume the page-load named in the session, or mount one if there is
    /// none.
    ///
    /// Waits while another request of the same page-load holds it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn resume(state: &AppState, session: Session) -> Result<Self, AppError> {
        match session.get::<Uuid>(PAGE_ID_KEY).await? {
            Some(id) => Ok(Self::open(state, id).await),
            None => Self::start(state, &session).await,
        }
    }

    async fn start(state: &AppState, session: &Session) -> Result<Self, AppError> {
        let id = Uuid::new_v4();
        session.insert(PAGE_ID_KEY, id).await?;
        Ok(Self::open(state, id).await)
    }

    async fn open(state: &AppState, id: Uuid) -> Self {
        let slot = state.pages().slot(id).await.lock_owned().await;
        let coordinator = Coordinator::restore(state.backend(), ViewState::clone(&slot));
        let changes = coordinator.subscribe();
        Self {
            coordinator,
            changes,
            slot,
        }
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        self.coordinator.state()
    }

    /// Coordinator for mutating operations.
    pub fn coordinator(&mut self) -> &mut Coordinator {
        &mut self.coordinator
    }

    /// Write the view state back if anything changed since the page was
    /// opened.
    pub fn save(&mut self) {
        if self.changes.has_changed().unwrap_or(false) {
            *self.slot = self.coordinator.state().clone();
            self.changes.mark_unchanged();
        }
    }
}

impl FromRequestParts<AppState> for Page {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        Self::resume(state, session).await
    }
}

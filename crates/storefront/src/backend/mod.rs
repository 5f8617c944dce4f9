//! Drops backend API.
//!
//! # Architecture
//!
//! - The backend owns products and subscriptions; the storefront only reads
//!   and forwards, it never stores anything itself
//! - [`Backend`] is the seam the coordinator talks to, so tests can swap in
//!   an in-memory fake
//! - [`TeesClient`] is the production implementation over `reqwest`
//!
//! # Endpoints
//!
//! ```text
//! GET  /api/tees/current?month=YYYY-MM  - This month's drop
//! GET  /api/tees/archive                - Every past drop
//! POST /api/subscribe                   - { "email": ... } -> { "message"?: ... }
//! ```

mod client;

pub use client::TeesClient;

use async_trait::async_trait;
use limited_tees_core::{MonthKey, Product, SubscribeRequest, SubscribeResponse};
use thiserror::Error;

/// Errors that can occur when talking to the drops backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Read and subscribe operations offered by the drops backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Products released in `month`.
    async fn current_tees(&self, month: MonthKey) -> Result<Vec<Product>, BackendError>;

    /// Every product ever released, unfiltered.
    async fn archive_tees(&self) -> Result<Vec<Product>, BackendError>;

    /// Add an address to the drop mailing list.
    async fn subscribe(
        &self,
        request: &SubscribeRequest,
    ) -> Result<SubscribeResponse, BackendError>;
}

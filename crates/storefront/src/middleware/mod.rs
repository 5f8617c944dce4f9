//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions over an idle-evicting `moka` store)
//!
//! The [`Page`] extractor sits on top of the session and hands handlers the
//! coordinator for the visitor's current page-load, one request at a time.

pub mod page;
pub mod request_id;
pub mod session;

pub use page::Page;
pub use request_id::request_id_middleware;
pub use session::create_session_layer;

//! Limited Edition Tees Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront:
//! - `storefront` - The public drop page and its backend client
//! - `integration-tests` - End-to-end tests against a fake backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Records are
//! decoded straight from the drops backend's JSON, so every validation rule
//! lives in the `Deserialize` path.
//!
//! # Modules
//!
//! - [`types`] - Products, prices, release months, and subscription payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

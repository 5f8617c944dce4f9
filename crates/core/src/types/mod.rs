//! Core types for Limited Edition Tees.
//!
//! This module provides type-safe wrappers for the drop's domain concepts.

pub mod month;
pub mod price;
pub mod product;
pub mod subscription;

pub use month::{MonthKey, MonthKeyError};
pub use price::{Price, PriceError};
pub use product::Product;
pub use subscription::{SubscribeRequest, SubscribeResponse};

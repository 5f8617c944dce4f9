//! Type-safe price representation using decimal arithmetic.
//!
//! Prices come from the drops backend as JSON numbers (`25`, `24.99`) or
//! numeric strings (`"24.99"`). Both decode into a [`Price`]; negative
//! amounts are rejected so a bad record fails the whole response body.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price in US dollars.
///
/// ## Examples
///
/// ```
/// use limited_tees_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(25, 0)).unwrap();
/// assert_eq!(price.to_string(), "$25.00");
///
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Returns the amount in dollars.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    /// Cents are rounded half away from zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "${cents:.2}")
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::new(Decimal::new(25, 0)).unwrap().to_string(), "$25.00");
        assert_eq!(Price::new(Decimal::new(2999, 2)).unwrap().to_string(), "$29.99");
        assert_eq!(Price::new(Decimal::new(305, 1)).unwrap().to_string(), "$30.50");
    }

    #[test]
    fn test_display_rounds_extra_places() {
        assert_eq!(Price::new(Decimal::new(24999, 3)).unwrap().to_string(), "$25.00");
        assert_eq!(Price::new(Decimal::new(125, 3)).unwrap().to_string(), "$0.13");
        assert_eq!(Price::new(Decimal::new(19_994, 3)).unwrap().to_string(), "$19.99");
    }

    #[test]
    fn test_zero_is_allowed() {
        assert!(Price::new(Decimal::ZERO).is_ok());
        assert!(Price::new(Decimal::new(-0, 2)).is_ok());
    }

    #[test]
    fn test_negative_is_rejected() {
        assert!(matches!(
            Price::new(Decimal::new(-100, 2)),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_int: Price = serde_json::from_str("25").unwrap();
        assert_eq!(from_int.amount(), Decimal::new(25, 0));

        let from_float: Price = serde_json::from_str("24.99").unwrap();
        assert_eq!(from_float.amount(), Decimal::new(2499, 2));

        let from_str: Price = serde_json::from_str("\"18.50\"").unwrap();
        assert_eq!(from_str.amount(), Decimal::new(1850, 2));
    }

    #[test]
    fn test_deserialize_negative_fails() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }
}

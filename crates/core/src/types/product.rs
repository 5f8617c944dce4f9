//! Product records as served by the drops backend.

use serde::{Deserialize, Serialize};

use crate::types::{MonthKey, Price};

/// One tee from a monthly drop.
///
/// Records are immutable once fetched and belong to whichever list (this
/// month's drop or the archive) they were fetched into. `slug` is unique
/// across both lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, also used in URLs.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Non-negative price in dollars.
    pub price: Price,
    /// Image URL, absolute or relative to the page.
    pub image: String,
    /// Long-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Month the tee was released in.
    pub release_month: MonthKey,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"slug":"a","name":"Tee A","price":25,"image":"a.png","release_month":"2024-03"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.slug, "a");
        assert_eq!(product.name, "Tee A");
        assert_eq!(product.price.amount(), Decimal::new(25, 0));
        assert_eq!(product.image, "a.png");
        assert_eq!(product.description, None);
        assert_eq!(product.release_month.to_string(), "2024-03");
    }

    #[test]
    fn test_deserialize_with_description_and_extra_fields() {
        let json = r#"{
            "slug": "midnight",
            "name": "Midnight Tee",
            "price": "32.50",
            "image": "https://cdn.example.com/midnight.png",
            "description": "Glow-in-the-dark print.",
            "release_month": "2023-10",
            "stock": 40
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.description.as_deref(), Some("Glow-in-the-dark print."));
        assert_eq!(product.price.to_string(), "$32.50");
    }

    #[test]
    fn test_deserialize_null_description() {
        let json = r#"{"slug":"b","name":"B","price":10,"image":"b.png","description":null,"release_month":"2024-01"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_deserialize_rejects_bad_records() {
        let negative = r#"{"slug":"c","name":"C","price":-1,"image":"c.png","release_month":"2024-01"}"#;
        assert!(serde_json::from_str::<Product>(negative).is_err());

        let bad_month = r#"{"slug":"c","name":"C","price":1,"image":"c.png","release_month":"Jan 2024"}"#;
        assert!(serde_json::from_str::<Product>(bad_month).is_err());

        let missing_slug = r#"{"name":"C","price":1,"image":"c.png","release_month":"2024-01"}"#;
        assert!(serde_json::from_str::<Product>(missing_slug).is_err());
    }
}

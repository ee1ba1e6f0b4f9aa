//! Catalog records: products and categories.
//!
//! These are the authoritative shapes at the system boundary. Rows coming
//! back from the database and JSON bodies coming in over HTTP both parse
//! into these structs; nothing downstream handles loose maps.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{CategoryId, ProductId};

/// A catalog product.
///
/// The cart snapshots `name`/`price`/`image_url`/`emoji` at add time and
/// never re-reads the catalog for items already in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: CategoryId,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: Option<String>,
    /// Display glyph used when no image is available.
    pub emoji: Option<String>,
    pub stock: i32,
    pub featured: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    /// Emoji shown next to the category name.
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_price_serializes_as_number() {
        let product = Product {
            id: ProductId::new("cofrinho-unicornio"),
            name: "Cofrinho Unicórnio".to_string(),
            category: CategoryId::new("brinquedos"),
            description: String::new(),
            price: "29.90".parse().expect("decimal"),
            image_url: None,
            emoji: Some("🦄".to_string()),
            stock: 10,
            featured: true,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&product).expect("serializes");
        assert!(value["price"].is_number(), "price must be a JSON number");
        assert_eq!(value["id"], "cofrinho-unicornio");
    }
}

//! Order records and order-id generation.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::types::id::OrderId;
use crate::types::money;
use crate::types::status::OrderStatus;

/// An order captured from a storefront submission.
///
/// `items` is the cart snapshot at submission time; `total` is recomputed
/// server-side from those items, never trusted from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Customer name.
    pub name: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub delivery_date: Option<NaiveDate>,
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build a new pending order from a submitted cart.
    #[must_use]
    pub fn new(
        name: String,
        phone: String,
        address: String,
        items: Vec<LineItem>,
        delivery_date: Option<NaiveDate>,
        observations: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let total = money::total(&items);
        Self {
            id: generate_order_id(),
            name,
            phone,
            address,
            items,
            total,
            status: OrderStatus::Pending,
            delivery_date,
            observations,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Generate an order id of the form `ORD-<base36 millis>-<5 alphanumerics>`,
/// uppercased (e.g. `ORD-MF2K1A9Q-X7P3B`).
#[must_use]
pub fn generate_order_id() -> OrderId {
    let millis = Utc::now().timestamp_millis().unsigned_abs();
    let suffix: String = rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(5)
        .map(char::from)
        .collect();

    OrderId::new(format!("ORD-{}-{}", to_base36(millis), suffix).to_uppercase())
}

/// Render an integer in base 36 (lowercase, no padding).
fn to_base36(mut n: u64) -> String {
    const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::ProductId;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_234_567), "qglj");
    }

    #[test]
    fn test_order_id_shape() {
        let id = generate_order_id();
        let id = id.as_str();
        assert!(id.starts_with("ORD-"), "got {id}");
        assert_eq!(id, id.to_uppercase(), "got {id}");

        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3, "got {id}");
        assert_eq!(parts[2].len(), 5, "got {id}");
    }

    #[test]
    fn test_new_order_recomputes_total() {
        let items = vec![LineItem {
            id: ProductId::new("a"),
            name: "Cofrinho Unicórnio".to_string(),
            price: "29.90".parse().expect("decimal"),
            quantity: 2,
            image_url: None,
            emoji: None,
        }];
        let order = Order::new(
            "Maria".to_string(),
            "(11) 98765-4321".to_string(),
            "Rua das Flores, 123".to_string(),
            items,
            None,
            None,
        );

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, "59.80".parse::<Decimal>().expect("decimal"));
    }
}

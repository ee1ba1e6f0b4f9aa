//! Order submission formatting: the WhatsApp hand-off.
//!
//! Checkout does not run a payment flow; it serializes the cart into a
//! human-readable message and deep-links to WhatsApp with the message
//! pre-filled. Composition is a pure function of the item list - no
//! timestamps, no randomness - so an unchanged cart always produces
//! byte-identical output.

use crate::cart::LineItem;
use crate::types::money::{format_brl, total};

/// Base URL of the WhatsApp click-to-chat service.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

const HEADER: &str = "🎪 *Pedido Oli Poli*";
const ITEMS_HEADING: &str = "📦 *Itens do Pedido:*";
const SEPARATOR: &str = "─────────────────";
const CLOSING: &str =
    "📍 Por favor, informe seu endereço para entrega!\n✨ Obrigado por escolher a Oli Poli!";

/// Strip everything but ASCII digits from a configured phone number.
#[must_use]
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Compose the order message for the given cart items.
///
/// Returns `None` for an empty cart: submission is then a no-op, not an
/// error. Each item renders as an indexed line carrying quantity, name,
/// line subtotal and unit price; the optional emoji glyph leads the line
/// when present.
#[must_use]
pub fn order_message(items: &[LineItem]) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    let mut message = String::new();
    message.push_str(HEADER);
    message.push_str("\n\n");
    message.push_str(ITEMS_HEADING);
    message.push('\n');
    message.push_str(SEPARATOR);
    message.push('\n');

    for (index, item) in items.iter().enumerate() {
        let glyph = item
            .emoji
            .as_deref()
            .map(|e| format!("{e} "))
            .unwrap_or_default();
        message.push_str(&format!(
            "{}. {glyph}{}x {} - {} (un. {})\n",
            index + 1,
            item.quantity,
            item.name,
            format_brl(item.subtotal()),
            format_brl(item.price),
        ));
    }

    message.push_str(SEPARATOR);
    message.push('\n');
    message.push_str(&format!("💰 *TOTAL: {}*\n\n", format_brl(total(items))));
    message.push_str(CLOSING);

    Some(message)
}

/// Build the `wa.me` deep link for the given cart and destination number.
///
/// Returns `None` for an empty cart. The message is percent-encoded into
/// the `text` query parameter; the phone number is reduced to digits.
#[must_use]
pub fn order_link(phone: &str, items: &[LineItem]) -> Option<String> {
    let message = order_message(items)?;
    Some(format!(
        "{WHATSAPP_BASE_URL}{}?text={}",
        digits_only(phone),
        urlencoding::encode(&message)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::ProductId;

    fn example_items() -> Vec<LineItem> {
        vec![
            LineItem {
                id: ProductId::new("a"),
                name: "Cofrinho Unicórnio".to_string(),
                price: "29.90".parse().expect("decimal"),
                quantity: 2,
                image_url: None,
                emoji: None,
            },
            LineItem {
                id: ProductId::new("b"),
                name: "Bolha de Sabão".to_string(),
                price: "9.50".parse().expect("decimal"),
                quantity: 1,
                image_url: None,
                emoji: None,
            },
        ]
    }

    #[test]
    fn test_empty_cart_composes_nothing() {
        assert_eq!(order_message(&[]), None);
        assert_eq!(order_link("+55 11 98765-4321", &[]), None);
    }

    #[test]
    fn test_message_contains_expected_lines() {
        let message = order_message(&example_items()).expect("non-empty cart");

        assert!(message.contains("2x Cofrinho Unicórnio - R$ 59,80"), "{message}");
        assert!(message.contains("1x Bolha de Sabão - R$ 9,50"), "{message}");
        assert!(message.contains("R$ 69,30"), "{message}");
        assert!(message.starts_with(HEADER), "{message}");
        assert!(message.contains("(un. R$ 29,90)"), "{message}");
        assert!(message.ends_with(CLOSING), "{message}");
    }

    #[test]
    fn test_items_are_indexed_in_order() {
        let message = order_message(&example_items()).expect("non-empty cart");
        let first = message.find("1. 2x Cofrinho").expect("first line");
        let second = message.find("2. 1x Bolha").expect("second line");
        assert!(first < second);
    }

    #[test]
    fn test_emoji_glyph_leads_the_line() {
        let mut items = example_items();
        items[0].emoji = Some("🦄".to_string());
        let message = order_message(&items).expect("non-empty cart");

        assert!(message.contains("1. 🦄 2x Cofrinho Unicórnio - R$ 59,80"), "{message}");
    }

    #[test]
    fn test_composition_is_idempotent() {
        let items = example_items();
        let first = order_message(&items).expect("non-empty");
        let second = order_message(&items).expect("non-empty");
        assert_eq!(first, second, "byte-identical for an unchanged cart");
    }

    #[test]
    fn test_link_strips_phone_and_encodes_message() {
        let link = order_link("+55 (11) 98765-4321", &example_items()).expect("non-empty");

        assert!(link.starts_with("https://wa.me/5511987654321?text="), "{link}");
        // The raw message must be percent-encoded: no spaces or asterisks.
        let (_, query) = link.split_once("?text=").expect("query");
        assert!(!query.contains(' '), "{query}");
        assert!(!query.contains('*'), "{query}");
        assert!(query.contains("Pedido"), "{query}");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("+55 (11) 98765-4321"), "5511987654321");
        assert_eq!(digits_only("11 9.8765-4321"), "11987654321");
        assert_eq!(digits_only("abc"), "");
    }
}

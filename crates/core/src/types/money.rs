//! Monetary arithmetic and pt-BR display formatting.
//!
//! All prices are `rust_decimal::Decimal` so that cart totals accumulate
//! exactly at currency scale instead of drifting through binary floats.
//! Formatting is hand-rolled rather than locale-negotiated: the shop sells
//! in BRL only and the output must be byte-deterministic for a given
//! amount (order messages are compared verbatim).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::cart::LineItem;

/// Sum of `unit price * quantity` over all items.
///
/// An empty slice yields zero.
#[must_use]
pub fn total(items: &[LineItem]) -> Decimal {
    items.iter().map(LineItem::subtotal).sum()
}

/// Format an amount as a BRL currency string, e.g. `R$ 1.234,56`.
///
/// Always two fraction digits, `.` as the thousands separator, `,` as the
/// decimal separator.
#[must_use]
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let (Some(units), Some(cents)) = (
        abs.trunc().to_u128(),
        (abs.fract() * Decimal::from(100)).round().to_u128(),
    ) else {
        // Out of u128 range; no realistic price gets here.
        return format!("R$ {rounded}");
    };

    let sign = if negative { "-" } else { "" };
    format!("R$ {sign}{},{cents:02}", group_thousands(units))
}

/// Format a UTC timestamp as a pt-BR date/time string, `dd/mm/YYYY HH:MM`.
#[must_use]
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%d/%m/%Y %H:%M").to_string()
}

/// Insert `.` separators every three digits from the right.
fn group_thousands(units: u128) -> String {
    let digits = units.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 3 == offset % 3 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::types::id::ProductId;

    fn item(id: &str, price: &str, quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            name: id.to_string(),
            price: price.parse().expect("valid decimal"),
            quantity,
            image_url: None,
            emoji: None,
        }
    }

    #[test]
    fn test_total_empty_is_zero() {
        assert_eq!(total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_total_sums_line_subtotals() {
        let items = vec![item("a", "29.90", 2), item("b", "9.50", 1)];
        assert_eq!(total(&items), "69.30".parse::<Decimal>().expect("decimal"));
    }

    #[test]
    fn test_total_has_no_accumulation_drift() {
        // 0.10 added a thousand times must be exactly 100.00.
        let items: Vec<LineItem> = (0..1000).map(|i| item(&format!("p{i}"), "0.10", 1)).collect();
        assert_eq!(total(&items), Decimal::from(100));
    }

    #[test]
    fn test_format_brl() {
        let cases = [
            ("0", "R$ 0,00"),
            ("9.5", "R$ 9,50"),
            ("69.30", "R$ 69,30"),
            ("59.8", "R$ 59,80"),
            ("1234.56", "R$ 1.234,56"),
            ("1234567.89", "R$ 1.234.567,89"),
            ("0.015", "R$ 0,02"),
        ];
        for (input, expected) in cases {
            let amount: Decimal = input.parse().expect("decimal");
            assert_eq!(format_brl(amount), expected, "amount {input}");
        }
    }

    #[test]
    fn test_format_brl_is_deterministic() {
        let amount: Decimal = "1299.90".parse().expect("decimal");
        assert_eq!(format_brl(amount), format_brl(amount));
    }

    #[test]
    fn test_format_date() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 7, 14, 5, 0).single().expect("valid");
        assert_eq!(format_date(ts), "07/03/2026 14:05");
    }
}

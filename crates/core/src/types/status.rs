//! Order status taxonomy.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown order status string.
#[derive(Debug, thiserror::Error)]
#[error("invalid order status: {0}")]
pub struct InvalidOrderStatus(pub String);

/// Lifecycle status of an order.
///
/// Stored in the database as the kebab-case string (`out-for-delivery`),
/// matching the JSON wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Separated,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The canonical wire/storage string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Separated => "separated",
            Self::OutForDelivery => "out-for-delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable pt-BR label for back-office displays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Confirmed => "Confirmado",
            Self::Separated => "Separado",
            Self::OutForDelivery => "Saiu para entrega",
            Self::Delivered => "Entregue",
            Self::Cancelled => "Cancelado",
        }
    }

    /// All statuses in lifecycle order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Pending,
            Self::Confirmed,
            Self::Separated,
            Self::OutForDelivery,
            Self::Delivered,
            Self::Cancelled,
        ]
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidOrderStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for status in OrderStatus::all() {
            let parsed: OrderStatus = status.as_str().parse().expect("parses");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).expect("serializes");
        assert_eq!(json, "\"out-for-delivery\"");
    }

    #[test]
    fn test_unknown_status_fails_to_parse() {
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_labels_are_localized() {
        assert_eq!(OrderStatus::OutForDelivery.label(), "Saiu para entrega");
        assert_eq!(OrderStatus::Pending.label(), "Pendente");
    }
}

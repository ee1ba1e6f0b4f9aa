//! Session-related constants.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the persisted cart slot: a JSON array of line items.
    pub const CART: &str = oli_poli_core::cart::CART_SLOT_KEY;
}

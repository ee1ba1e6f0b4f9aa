//! The cart store: the single source of truth for one session's cart.
//!
//! A [`Cart`] is an insertion-ordered list of [`LineItem`]s plus a
//! non-persisted panel-visibility flag. Total and count are always derived
//! from the item list; they are never stored separately, so they cannot
//! drift.
//!
//! Persistence goes through the [`CartStorage`] seam: the storefront backs
//! it with the session slot, tests back it with [`MemoryCartStorage`]. A
//! failed load yields an empty cart (never an error); a failed save leaves
//! the in-memory cart authoritative and surfaces as a non-fatal
//! [`CartStorageError`] for the caller to log.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::catalog::Product;
use crate::types::id::ProductId;
use crate::types::money;

/// Fixed name of the persisted cart slot.
pub const CART_SLOT_KEY: &str = "oli_poli_cart";

/// One product-plus-quantity entry in a cart.
///
/// Fields other than `quantity` are a snapshot of the product at the
/// moment it was added; later catalog edits do not touch existing carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
}

impl LineItem {
    /// Snapshot a catalog product into a cart entry.
    #[must_use]
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
            image_url: product.image_url.clone(),
            emoji: product.emoji.clone(),
        }
    }

    /// `unit price * quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Derived read model returned by every cart operation.
///
/// Returning the fresh summary from each mutation is how other interested
/// readers (count badge, panel) stay in sync without a separate broadcast
/// channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub count: u32,
    pub open: bool,
}

/// The ordered collection of line items for the current session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
    /// Panel visibility; intentionally not persisted, defaults to closed.
    #[serde(skip)]
    open: bool,
}

impl Cart {
    /// An empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from a persisted item list.
    ///
    /// Entries that violate the quantity invariant are dropped rather than
    /// rejected wholesale, so one bad entry does not wipe the cart.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self {
            items: items.into_iter().filter(|item| item.quantity >= 1).collect(),
            open: false,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a product to the cart.
    ///
    /// Re-adding an id already in the cart increments its quantity instead
    /// of appending a duplicate entry. A `quantity` below 1 is clamped to 1.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem::snapshot(product, quantity));
        }
    }

    /// Set the quantity of an item.
    ///
    /// A quantity below 1 removes the item. An unknown id is a silent
    /// no-op.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity < 1 {
            self.remove_item(id);
        } else if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.quantity = quantity;
        }
    }

    /// Remove an item; unknown ids are a silent no-op.
    pub fn remove_item(&mut self, id: &ProductId) {
        self.items.retain(|item| &item.id != id);
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * quantity` over all items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        money::total(&self.items)
    }

    /// Sum of quantities over all items (badge count).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.items.clone(),
            total: self.total(),
            count: self.count(),
            open: self.open,
        }
    }
}

/// Error reading or writing the persisted cart slot.
#[derive(Debug, thiserror::Error)]
pub enum CartStorageError {
    #[error("failed to read cart slot: {0}")]
    Load(String),
    #[error("failed to write cart slot: {0}")]
    Save(String),
}

/// Persistence seam for the cart slot.
///
/// Implementations store the serialized line-item list under a fixed key
/// ([`CART_SLOT_KEY`]). Decoding what was just encoded must reproduce an
/// equal list.
pub trait CartStorage {
    /// Load the persisted item list; `Ok(None)` when the slot is absent.
    fn load(&self) -> Result<Option<Vec<LineItem>>, CartStorageError>;

    /// Persist the full item list, replacing the previous slot contents.
    fn save(&self, items: &[LineItem]) -> Result<(), CartStorageError>;
}

/// A [`Cart`] bound to a storage adapter.
///
/// Every mutation re-persists the full item list. A save failure does not
/// roll the mutation back: the in-memory cart stays authoritative for the
/// rest of the session and the error is returned for the caller to surface
/// as a warning.
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the store, initializing from the persisted slot.
    ///
    /// An absent or unreadable slot yields an empty cart; this never
    /// fails.
    pub fn open(storage: S) -> Self {
        let cart = match storage.load() {
            Ok(Some(items)) => Cart::from_items(items),
            Ok(None) | Err(_) => Cart::new(),
        };
        Self { cart, storage }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// See [`Cart::add_item`].
    ///
    /// # Errors
    ///
    /// Returns the save error if persisting fails; the in-memory cart is
    /// already mutated.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<CartSummary, CartStorageError> {
        self.cart.add_item(product, quantity);
        self.persist()
    }

    /// See [`Cart::update_quantity`].
    ///
    /// # Errors
    ///
    /// Returns the save error if persisting fails; the in-memory cart is
    /// already mutated.
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        quantity: u32,
    ) -> Result<CartSummary, CartStorageError> {
        self.cart.update_quantity(id, quantity);
        self.persist()
    }

    /// See [`Cart::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns the save error if persisting fails; the in-memory cart is
    /// already mutated.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<CartSummary, CartStorageError> {
        self.cart.remove_item(id);
        self.persist()
    }

    /// See [`Cart::clear`].
    ///
    /// # Errors
    ///
    /// Returns the save error if persisting fails; the in-memory cart is
    /// already mutated.
    pub fn clear(&mut self) -> Result<CartSummary, CartStorageError> {
        self.cart.clear();
        self.persist()
    }

    /// Toggle the panel; visibility is not persisted.
    pub fn set_open(&mut self, open: bool) {
        self.cart.set_open(open);
    }

    fn persist(&self) -> Result<CartSummary, CartStorageError> {
        let summary = self.cart.summary();
        self.storage.save(self.cart.items())?;
        Ok(summary)
    }
}

/// In-memory slot storage.
///
/// Serializes through the same JSON wire format as a real slot, so
/// round-trip behavior is exercised even in unit tests.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    slot: std::sync::Mutex<Option<String>>,
}

impl MemoryCartStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load the slot with raw JSON (possibly corrupt, for tests).
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: std::sync::Mutex::new(Some(raw.into())),
        }
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Option<Vec<LineItem>>, CartStorageError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| CartStorageError::Load(e.to_string()))?;
        match slot.as_deref() {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| CartStorageError::Load(e.to_string())),
        }
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CartStorageError> {
        let raw =
            serde_json::to_string(items).map_err(|e| CartStorageError::Save(e.to_string()))?;
        *self
            .slot
            .lock()
            .map_err(|e| CartStorageError::Save(e.to_string()))? = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::id::CategoryId;

    fn product(id: &str, name: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: CategoryId::new("brinquedos"),
            description: String::new(),
            price: price.parse().expect("valid decimal"),
            image_url: None,
            emoji: None,
            stock: 10,
            featured: false,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal")
    }

    #[test]
    fn test_count_and_total_track_items() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", "Cofrinho Unicórnio", "29.90"), 2);
        cart.add_item(&product("b", "Bolha de Sabão", "9.50"), 1);

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), dec("69.30"));

        cart.update_quantity(&ProductId::new("b"), 4);
        assert_eq!(cart.count(), 6);
        assert_eq!(cart.total(), dec("97.80"));

        cart.remove_item(&ProductId::new("a"));
        assert_eq!(cart.count(), 4);
        assert_eq!(cart.total(), dec("38.00"));
    }

    #[test]
    fn test_re_adding_merges_quantities() {
        let mut cart = Cart::new();
        let p = product("a", "Cofrinho Unicórnio", "29.90");
        cart.add_item(&p, 2);
        cart.add_item(&p, 3);

        assert_eq!(cart.items().len(), 1, "no duplicate entry");
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_clamps_quantity_to_one() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", "Cofrinho Unicórnio", "29.90"), 0);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_update_below_one_removes() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", "Cofrinho Unicórnio", "29.90"), 2);
        cart.update_quantity(&ProductId::new("a"), 0);

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", "Cofrinho Unicórnio", "29.90"), 2);
        cart.update_quantity(&ProductId::new("ghost"), 7);
        cart.remove_item(&ProductId::new("ghost"));

        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_snapshot_ignores_later_catalog_edits() {
        let mut cart = Cart::new();
        let mut p = product("a", "Cofrinho Unicórnio", "29.90");
        cart.add_item(&p, 1);

        p.price = dec("39.90");
        p.name = "Cofrinho Unicórnio Deluxe".to_string();

        assert_eq!(cart.items()[0].price, dec("29.90"));
        assert_eq!(cart.items()[0].name, "Cofrinho Unicórnio");
    }

    #[test]
    fn test_panel_defaults_closed() {
        let mut cart = Cart::new();
        assert!(!cart.is_open());
        cart.set_open(true);
        assert!(cart.is_open());
        assert!(cart.summary().open);
    }

    #[test]
    fn test_example_scenario() {
        // The worked example: 2x R$29,90 + 1x R$9,50.
        let mut cart = Cart::new();
        cart.add_item(&product("a", "Cofrinho Unicórnio", "29.90"), 2);
        cart.add_item(&product("b", "Bolha de Sabão", "9.50"), 1);

        assert_eq!(cart.total(), dec("69.30"));
        assert_eq!(cart.count(), 3);

        cart.remove_item(&ProductId::new("b"));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total(), dec("59.80"));
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_store_persists_and_reloads() {
        let storage = MemoryCartStorage::new();
        let mut store = CartStore::open(storage);
        store
            .add_item(&product("a", "Cofrinho Unicórnio", "29.90"), 2)
            .expect("save ok");
        store
            .add_item(&product("b", "Bolha de Sabão", "9.50"), 1)
            .expect("save ok");

        let before = store.cart().items().to_vec();
        let CartStore { storage, .. } = store;

        // Reload from the same slot: same ids, prices, quantities.
        let reloaded = CartStore::open(storage);
        assert_eq!(reloaded.cart().items(), before.as_slice());
        assert_eq!(reloaded.cart().total(), dec("69.30"));
    }

    #[test]
    fn test_corrupt_slot_loads_as_empty_cart() {
        let storage = MemoryCartStorage::with_raw("{not json");
        let store = CartStore::open(storage);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_slot_entry_with_zero_quantity_is_dropped() {
        let raw = r#"[
            {"id":"a","name":"Cofrinho Unicórnio","price":29.9,"quantity":2},
            {"id":"b","name":"Bolha de Sabão","price":9.5,"quantity":0}
        ]"#;
        let store = CartStore::open(MemoryCartStorage::with_raw(raw));
        assert_eq!(store.cart().items().len(), 1);
        assert_eq!(store.cart().count(), 2);
    }

    #[test]
    fn test_failed_save_keeps_memory_authoritative() {
        struct FailingStorage;
        impl CartStorage for FailingStorage {
            fn load(&self) -> Result<Option<Vec<LineItem>>, CartStorageError> {
                Ok(None)
            }
            fn save(&self, _items: &[LineItem]) -> Result<(), CartStorageError> {
                Err(CartStorageError::Save("quota exceeded".to_string()))
            }
        }

        let mut store = CartStore::open(FailingStorage);
        let err = store
            .add_item(&product("a", "Cofrinho Unicórnio", "29.90"), 1)
            .expect_err("save fails");
        assert!(matches!(err, CartStorageError::Save(_)));

        // The mutation still took effect in memory.
        assert_eq!(store.cart().count(), 1);
    }
}

//! Oli Poli Core - Shared types and domain logic.
//!
//! This crate provides the types and pure logic used across all Oli Poli
//! components:
//! - `storefront` - Public-facing shop API
//! - `admin` - Back-office CRUD API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and side-effect-free logic - no I/O,
//! no database access, no HTTP. This keeps it lightweight and allows it to
//! be used (and tested) anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, catalog/order/settings records
//! - [`cart`] - The cart store and its persistence seam
//! - [`whatsapp`] - Order message composition and `wa.me` deep links
//! - [`slug`] - Slug derivation for catalog identifiers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod slug;
pub mod types;
pub mod whatsapp;

pub use cart::{Cart, CartStorage, CartStorageError, CartStore, CartSummary, LineItem};
pub use types::*;

//! Core types for Oli Poli.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod id;
pub mod money;
pub mod order;
pub mod settings;
pub mod status;

pub use catalog::{Category, Product};
pub use id::*;
pub use money::{format_brl, format_date, total};
pub use order::{Order, generate_order_id};
pub use settings::{SiteSettings, setting_keys};
pub use status::{InvalidOrderStatus, OrderStatus};

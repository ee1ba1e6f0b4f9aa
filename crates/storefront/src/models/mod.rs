//! Storefront models.

pub mod session;

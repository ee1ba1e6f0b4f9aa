//! Oli Poli Admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused (the CLI seeds through its
//! repositories).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;

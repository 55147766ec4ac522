//! Stockroom API library.
//!
//! CRUD over users, products, orders and inventory, backed by a document
//! store. The binary in `main.rs` wires configuration, logging and a store
//! backend around [`routes::app`]; tests drive the same router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod codec;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, StoreBackend};
pub use state::AppState;

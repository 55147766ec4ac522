//! Stockroom Core - Shared types library.
//!
//! This crate provides the types shared by the Stockroom components:
//! - `api` - The REST service over the document store
//! - `integration-tests` - End-to-end HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no store
//! access, no HTTP. The optional `bson` feature adds identifier conversions
//! for the document store driver.
//!
//! # Modules
//!
//! - [`types`] - Resource identifiers
//! - [`models`] - User, product, order and inventory records
//! - [`discount`] - Order discount table

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod discount;
pub mod models;
pub mod types;

pub use discount::{CustomerTier, discount_rate};
pub use models::{Inventory, Order, Product, User, ValidationError};
pub use types::*;

//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers shared by every resource.

pub mod id;

pub use id::{IdError, ResourceId};

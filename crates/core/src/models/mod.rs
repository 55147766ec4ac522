//! Resource records.
//!
//! These are the wire-level shapes of the four resources. Every struct decodes
//! leniently: a field missing from a payload takes its zero value, and only
//! [`User`] enforces required fields (see [`User::validate`]).

pub mod inventory;
pub mod order;
pub mod product;
pub mod user;

pub use inventory::Inventory;
pub use order::Order;
pub use product::Product;
pub use user::User;

/// A record failed field-level validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are empty.
    #[error("{} required", .0.join(" and "))]
    MissingFields(Vec<&'static str>),
}

//! Schema definition for the provider, receiver, listing and claim tables.

pub mod manager;
pub mod tables;

pub use manager::SchemaManager;
pub use tables::{Claims, FoodListings, Providers, Receivers};

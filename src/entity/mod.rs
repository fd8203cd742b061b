//! Row models for the four tables.
//!
//! Every model deserializes from a CSV row (field names are the CSV headers) and decodes
//! from a result [`Row`](crate::row::Row) through [`FromRow`](crate::row::FromRow).

pub mod claim;
pub mod dates;
pub mod food_listing;
pub mod provider;
pub mod receiver;

pub use claim::{Claim, ClaimStatus};
pub use food_listing::{FoodListing, NewListing, ProviderContact};
pub use provider::Provider;
pub use receiver::Receiver;

use crate::executor::FoodError;
use crate::row::Row;
use sea_query::{Iden, Value};
use serde::de::DeserializeOwned;

/// A model that maps one-to-one onto a table row and can be bulk-loaded from CSV
pub trait Record: DeserializeOwned + Sized {
    /// Column identifier enum of the backing table
    type Column: Iden + Copy + 'static;

    /// Identifier of the table itself
    const TABLE: Self::Column;

    /// Columns in insert order; matches [`Record::values`]
    const COLUMNS: &'static [Self::Column];

    /// Values to insert, one per entry of [`Record::COLUMNS`]
    fn values(&self) -> Vec<Value>;

    /// Reject rows that deserialize but break a domain rule
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Read a nullable text column, mapping NULL to an empty string
pub(crate) fn text_or_empty(row: &Row, idx: usize) -> Result<String, FoodError> {
    Ok(row.try_get::<Option<String>>(idx)?.unwrap_or_default())
}

//! # foodlink
//!
//! Data-access core for a surplus-food donation dashboard: a SQLite schema of providers,
//! receivers, food listings and claims, a CSV bulk loader, listing operations and a
//! catalog of fifteen canned reports.
//!
//! Presentation layers call into [`Session`] (or the free functions in [`listings`] and
//! [`report`] with any [`FoodExecutor`]) and render the typed results.

pub mod config;
pub mod connection;
pub mod entity;
pub mod executor;
pub mod listings;
pub mod loader;
pub mod query;
pub mod raw_sql;
pub mod report;
pub mod row;
pub mod schema;
pub mod session;
pub mod transaction;

#[cfg(test)]
mod test_helpers;

pub use config::FoodlinkConfig;
pub use connection::{connect, ConnectionError};
pub use entity::{Claim, ClaimStatus, FoodListing, NewListing, Provider, ProviderContact, Receiver};
pub use executor::{FoodError, FoodExecutor, SqliteExecutor};
pub use listings::{FilterValue, ListingColumn, ListingFilter, SearchResult};
pub use loader::{initialize, LoadError, LoadSummary, TableLoad};
pub use raw_sql::{
    execute_statement, execute_unprepared, find_all_by_statement, find_by_statement,
    find_set_by_statement, query_value,
};
pub use report::{ReportId, ReportOutcome, ReportTable};
pub use row::{Cell, FromRow, Row, RowSet};
pub use session::Session;
pub use transaction::{Transaction, TransactionError};

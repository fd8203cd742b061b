//! Execution of statements built with SeaQuery.
//!
//! Statements are rendered with `SqliteQueryBuilder` into SQL with `?` placeholders plus a
//! `Values` list; these helpers bind the values and run the SQL on any [`FoodExecutor`].

pub mod value_conversion;

use crate::executor::{FoodError, FoodExecutor};
use crate::row::{FromRow, Row};
use value_conversion::with_converted_params;

pub use sea_query::SqliteQueryBuilder;

/// Execute a built statement and return the number of rows affected
///
/// # Errors
///
/// Returns `FoodError` if parameter conversion or execution fails.
pub fn execute_built<E: FoodExecutor + ?Sized>(
    executor: &E,
    built: &(String, sea_query::Values),
) -> Result<u64, FoodError> {
    let (sql, values) = built;
    with_converted_params(values, |params| executor.execute(sql, params))
}

/// Run a built query and return every row
///
/// # Errors
///
/// Returns `FoodError` if parameter conversion or execution fails.
pub fn fetch_built<E: FoodExecutor + ?Sized>(
    executor: &E,
    built: &(String, sea_query::Values),
) -> Result<Vec<Row>, FoodError> {
    let (sql, values) = built;
    with_converted_params(values, |params| executor.query_all(sql, params))
}

/// Run a built query and decode every row into `M`
///
/// # Errors
///
/// Returns `FoodError` if execution fails or any row does not decode.
pub fn fetch_models<M: FromRow, E: FoodExecutor + ?Sized>(
    executor: &E,
    built: &(String, sea_query::Values),
) -> Result<Vec<M>, FoodError> {
    fetch_built(executor, built)?
        .iter()
        .map(M::from_row)
        .collect()
}

//! Raw SQL helpers
//!
//! Convenience functions for running hand-written SQL, used by the report catalog and for
//! the few statements that are clearer as text than as builder calls.

use crate::executor::{FoodError, FoodExecutor};
use crate::row::{Row, RowSet};
use rusqlite::types::{FromSql, ToSql};

/// Execute an unprepared SQL statement without parameters
///
/// # Errors
///
/// Returns `FoodError` if the SQL execution fails.
///
/// # Examples
///
/// ```no_run
/// use foodlink::{execute_unprepared, FoodError, SqliteExecutor};
///
/// # fn main() -> Result<(), FoodError> {
/// let executor = SqliteExecutor::open_in_memory().map_err(|e| FoodError::Other(e.to_string()))?;
/// execute_unprepared(&executor, "CREATE TABLE t (id INTEGER PRIMARY KEY)")?;
/// # Ok(())
/// # }
/// ```
pub fn execute_unprepared<E: FoodExecutor + ?Sized>(executor: &E, sql: &str) -> Result<u64, FoodError> {
    executor.execute(sql, &[])
}

/// Execute a prepared statement with parameters
///
/// # Errors
///
/// Returns `FoodError` if the SQL execution fails.
pub fn execute_statement<E: FoodExecutor + ?Sized>(
    executor: &E,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<u64, FoodError> {
    executor.execute(sql, params)
}

/// Query a single row using a raw SQL statement
///
/// # Errors
///
/// Returns `FoodError` if the query fails or does not return exactly one row.
pub fn find_by_statement<E: FoodExecutor + ?Sized>(
    executor: &E,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<Row, FoodError> {
    executor.query_one(sql, params)
}

/// Query multiple rows using a raw SQL statement
///
/// # Errors
///
/// Returns `FoodError` if the query execution fails.
pub fn find_all_by_statement<E: FoodExecutor + ?Sized>(
    executor: &E,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<Row>, FoodError> {
    executor.query_all(sql, params)
}

/// Query rows together with their column names
///
/// # Errors
///
/// Returns `FoodError` if the query execution fails.
pub fn find_set_by_statement<E: FoodExecutor + ?Sized>(
    executor: &E,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<RowSet, FoodError> {
    executor.query_set(sql, params)
}

/// Query a single value from the first column of the only row
///
/// # Examples
///
/// ```no_run
/// use foodlink::{query_value, FoodError, SqliteExecutor};
///
/// # fn main() -> Result<(), FoodError> {
/// let executor = SqliteExecutor::open_in_memory().map_err(|e| FoodError::Other(e.to_string()))?;
/// let answer: i64 = query_value(&executor, "SELECT 6 * 7", &[])?;
/// assert_eq!(answer, 42);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns `FoodError` if:
/// - The query execution fails
/// - No rows or more than one row are returned
/// - Value extraction/conversion fails
pub fn query_value<T: FromSql, E: FoodExecutor + ?Sized>(
    executor: &E,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<T, FoodError> {
    let row = executor.query_one(sql, params)?;
    row.try_get::<T>(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::SqliteExecutor;

    #[test]
    fn test_query_value_and_statements() {
        let executor = SqliteExecutor::open_in_memory().unwrap();
        execute_unprepared(&executor, "CREATE TABLE t (id INTEGER PRIMARY KEY, v INTEGER)").unwrap();
        execute_statement(&executor, "INSERT INTO t (v) VALUES (?1), (?2)", &[&3i64, &4i64]).unwrap();

        let total: i64 = query_value(&executor, "SELECT SUM(v) FROM t", &[]).unwrap();
        assert_eq!(total, 7);

        let row = find_by_statement(&executor, "SELECT v FROM t WHERE id = ?1", &[&2i64]).unwrap();
        assert_eq!(row.try_get::<i64>(0).unwrap(), 4);

        let rows = find_all_by_statement(&executor, "SELECT v FROM t ORDER BY v DESC", &[]).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_query_value_type_mismatch() {
        let executor = SqliteExecutor::open_in_memory().unwrap();
        let err = query_value::<i64, _>(&executor, "SELECT 'text'", &[]).unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }
}

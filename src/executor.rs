//! `FoodExecutor` module
//!
//! Provides the `FoodExecutor` trait that abstracts statement execution over SQLite.
//!
//! Listing operations, the CSV loader and the report catalog are all written against this
//! trait, so they run unchanged against a plain connection or an open transaction.

use crate::row::{Cell, Row, RowSet};
use rusqlite::types::ToSql;
use rusqlite::Connection;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Error type shared by every data-access operation
#[derive(Debug)]
pub enum FoodError {
    /// SQLite engine error from `rusqlite`
    SqliteError(rusqlite::Error),
    /// Query execution error
    QueryError(String),
    /// Row parsing/conversion error
    ParseError(String),
    /// Input rejected before reaching the database
    Validation(String),
    /// A referenced row does not exist
    NotFound { entity: &'static str, id: i64 },
    /// Other execution errors
    Other(String),
}

impl fmt::Display for FoodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodError::SqliteError(e) => write!(f, "SQLite error: {e}"),
            FoodError::QueryError(s) => write!(f, "Query error: {s}"),
            FoodError::ParseError(s) => write!(f, "Parse error: {s}"),
            FoodError::Validation(s) => write!(f, "Validation error: {s}"),
            FoodError::NotFound { entity, id } => write!(f, "No {entity} with id {id}"),
            FoodError::Other(s) => write!(f, "Execution error: {s}"),
        }
    }
}

impl std::error::Error for FoodError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FoodError::SqliteError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for FoodError {
    fn from(err: rusqlite::Error) -> Self {
        FoodError::SqliteError(err)
    }
}

/// Trait for executing database operations
///
/// Implemented by [`SqliteExecutor`] (a single owned connection) and by
/// [`Transaction`](crate::transaction::Transaction), so callers can pick the scope.
///
/// # Examples
///
/// ```no_run
/// use foodlink::{FoodExecutor, FoodError, SqliteExecutor};
///
/// # fn main() -> Result<(), FoodError> {
/// let executor = SqliteExecutor::open_in_memory()
///     .map_err(|e| FoodError::Other(e.to_string()))?;
/// executor.execute("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)", &[])?;
/// executor.execute("INSERT INTO t (name) VALUES (?1)", &[&"bread"])?;
///
/// let rows = executor.query_all("SELECT id, name FROM t", &[])?;
/// let names: Vec<String> = rows
///     .iter()
///     .map(|r| r.try_get::<String>(1))
///     .collect::<Result<_, _>>()?;
/// # Ok(())
/// # }
/// ```
pub trait FoodExecutor {
    /// Execute a SQL statement and return the number of rows affected
    ///
    /// Placeholders are `?` or `?N`. Returns `Ok(0)` for statements that change no rows.
    ///
    /// # Errors
    ///
    /// Returns `FoodError` if preparation or execution fails, including when the
    /// statement unexpectedly produces rows.
    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<u64, FoodError>;

    /// Execute a query and return its column names together with every row
    ///
    /// The column names are available even when the result is empty.
    ///
    /// # Errors
    ///
    /// Returns `FoodError` if the query execution fails.
    fn query_set(&self, query: &str, params: &[&dyn ToSql]) -> Result<RowSet, FoodError>;

    /// Execute a query and return all rows
    ///
    /// # Errors
    ///
    /// Returns `FoodError` if the query execution fails.
    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, FoodError> {
        Ok(self.query_set(query, params)?.rows)
    }

    /// Execute a query and return exactly one row
    ///
    /// # Errors
    ///
    /// Returns `FoodError::QueryError` when the query yields no rows or more than one.
    fn query_one(&self, query: &str, params: &[&dyn ToSql]) -> Result<Row, FoodError> {
        let mut rows = self.query_all(query, params)?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            0 => Err(FoodError::QueryError("query returned no rows".to_string())),
            n => Err(FoodError::QueryError(format!(
                "query returned {n} rows, expected exactly one"
            ))),
        }
    }
}

impl<T: FoodExecutor + ?Sized> FoodExecutor for &T {
    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<u64, FoodError> {
        (**self).execute(query, params)
    }

    fn query_set(&self, query: &str, params: &[&dyn ToSql]) -> Result<RowSet, FoodError> {
        (**self).query_set(query, params)
    }
}

/// Run a statement on a raw connection; shared by the connection and transaction executors.
pub(crate) fn execute_on(
    conn: &Connection,
    query: &str,
    params: &[&dyn ToSql],
) -> Result<u64, FoodError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("foodlink.execute", sql = query).entered();

    log::debug!("execute: {}", query);
    let start = Instant::now();
    let mut stmt = conn.prepare(query)?;
    let affected = stmt.execute(params)?;
    log::trace!("execute finished in {:?}, {} row(s) affected", start.elapsed(), affected);

    Ok(affected as u64)
}

/// Run a query on a raw connection and copy every row out of the statement.
pub(crate) fn query_on(
    conn: &Connection,
    query: &str,
    params: &[&dyn ToSql],
) -> Result<RowSet, FoodError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("foodlink.query", sql = query).entered();

    log::debug!("query: {}", query);
    let start = Instant::now();
    let mut stmt = conn.prepare(query)?;
    let columns: Arc<Vec<String>> = Arc::new(
        stmt.column_names()
            .into_iter()
            .map(String::from)
            .collect(),
    );
    let width = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query(params)?;
    while let Some(row) = cursor.next()? {
        let mut cells = Vec::with_capacity(width);
        for idx in 0..width {
            cells.push(Cell::from(row.get_ref(idx)?));
        }
        rows.push(Row::new(Arc::clone(&columns), cells));
    }
    log::trace!("query finished in {:?}, {} row(s)", start.elapsed(), rows.len());

    Ok(RowSet::new(columns, rows))
}

/// Implementation of `FoodExecutor` for a single owned `rusqlite::Connection`
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    /// Create a new executor from an open connection
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (or create) the database file at `path`
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the path is invalid or SQLite cannot open it.
    pub fn open(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::connection::ConnectionError> {
        crate::connection::connect(path.as_ref()).map(Self::new)
    }

    /// Open a private in-memory database
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, crate::connection::ConnectionError> {
        Connection::open_in_memory()
            .map(Self::new)
            .map_err(crate::connection::ConnectionError::from)
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Start a new deferred transaction
    ///
    /// The transaction rolls back when dropped without [`commit`](crate::transaction::Transaction::commit).
    ///
    /// # Errors
    ///
    /// Returns `TransactionError` if the transaction cannot be started, for example
    /// because one is already open on this connection.
    pub fn begin(
        &self,
    ) -> Result<crate::transaction::Transaction<'_>, crate::transaction::TransactionError> {
        crate::transaction::Transaction::new(&self.conn)
    }

    /// Check if the underlying connection is healthy by running `SELECT 1`
    ///
    /// # Errors
    ///
    /// Returns `FoodError` if the health check query fails.
    pub fn check_health(&self) -> Result<bool, FoodError> {
        crate::connection::check_connection_health(&self.conn).map_err(FoodError::from)
    }
}

impl FoodExecutor for SqliteExecutor {
    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<u64, FoodError> {
        execute_on(&self.conn, query, params)
    }

    fn query_set(&self, query: &str, params: &[&dyn ToSql]) -> Result<RowSet, FoodError> {
        query_on(&self.conn, query, params)
    }
}

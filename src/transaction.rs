//! Transaction module
//!
//! Provides a transaction type that implements [`FoodExecutor`], so every listing
//! operation, the loader and the report catalog can run inside one.
//!
//! A transaction that is dropped without [`Transaction::commit`] is rolled back.

use crate::executor::{execute_on, query_on, FoodError, FoodExecutor, SqliteExecutor};
use crate::row::RowSet;
use rusqlite::types::ToSql;
use rusqlite::Connection;
use std::fmt;

/// Transaction error type
#[derive(Debug)]
pub enum TransactionError {
    /// SQLite error while beginning, committing or rolling back
    SqliteError(rusqlite::Error),
}

impl fmt::Display for TransactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionError::SqliteError(e) => write!(f, "SQLite error: {}", e),
        }
    }
}

impl std::error::Error for TransactionError {}

impl From<rusqlite::Error> for TransactionError {
    fn from(err: rusqlite::Error) -> Self {
        TransactionError::SqliteError(err)
    }
}

impl From<TransactionError> for FoodError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::SqliteError(e) => FoodError::SqliteError(e),
        }
    }
}

/// An open transaction on a borrowed connection
pub struct Transaction<'c> {
    inner: rusqlite::Transaction<'c>,
}

impl<'c> Transaction<'c> {
    /// Begin a deferred transaction on `conn`
    ///
    /// # Errors
    ///
    /// Returns `TransactionError` if SQLite refuses to begin, e.g. when a transaction is
    /// already open on this connection.
    pub fn new(conn: &'c Connection) -> Result<Self, TransactionError> {
        let inner = conn.unchecked_transaction()?;
        log::trace!("transaction started");
        Ok(Self { inner })
    }

    /// Commit the transaction
    ///
    /// # Errors
    ///
    /// Returns `TransactionError` if the commit fails; the changes are then rolled back.
    pub fn commit(self) -> Result<(), TransactionError> {
        self.inner.commit()?;
        log::trace!("transaction committed");
        Ok(())
    }

    /// Roll the transaction back explicitly
    ///
    /// # Errors
    ///
    /// Returns `TransactionError` if the rollback fails.
    pub fn rollback(self) -> Result<(), TransactionError> {
        self.inner.rollback()?;
        log::trace!("transaction rolled back");
        Ok(())
    }
}

impl FoodExecutor for Transaction<'_> {
    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<u64, FoodError> {
        execute_on(&self.inner, query, params)
    }

    fn query_set(&self, query: &str, params: &[&dyn ToSql]) -> Result<RowSet, FoodError> {
        query_on(&self.inner, query, params)
    }
}

impl SqliteExecutor {
    /// Run `f` inside a transaction, committing when it returns `Ok`
    ///
    /// When `f` returns an error the transaction is rolled back and the error is returned
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use foodlink::{FoodExecutor, SqliteExecutor};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let executor = SqliteExecutor::open_in_memory()?;
    /// executor.execute("CREATE TABLE t (id INTEGER PRIMARY KEY)", &[])?;
    /// let inserted = executor.in_transaction(|tx| {
    ///     tx.execute("INSERT INTO t DEFAULT VALUES", &[])
    /// })?;
    /// assert_eq!(inserted, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn in_transaction<T, F>(&self, f: F) -> Result<T, FoodError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, FoodError>,
    {
        let tx = self.begin()?;
        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    log::warn!("rollback after failed transaction also failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}

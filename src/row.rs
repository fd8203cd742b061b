//! Owned query results.
//!
//! `rusqlite` rows borrow their statement, so every row is copied into a [`Row`] of
//! [`Cell`]s before it leaves the executor. Rows keep a shared handle to the column names
//! and can be decoded by index or by name.

use crate::executor::FoodError;
use rusqlite::types::{FromSql, ValueRef};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A single SQLite value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Cell {
    /// Borrow the cell as a `rusqlite` value reference for `FromSql` decoding
    pub fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            Cell::Null => ValueRef::Null,
            Cell::Integer(i) => ValueRef::Integer(*i),
            Cell::Real(f) => ValueRef::Real(*f),
            Cell::Text(s) => ValueRef::Text(s.as_bytes()),
            Cell::Blob(b) => ValueRef::Blob(b),
        }
    }

    /// Numeric view of the cell; integers widen to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(i) => Some(*i as f64),
            Cell::Real(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<ValueRef<'_>> for Cell {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Cell::Null,
            ValueRef::Integer(i) => Cell::Integer(i),
            ValueRef::Real(f) => Cell::Real(f),
            ValueRef::Text(t) => Cell::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Cell::Blob(b.to_vec()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Real(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// One result row, detached from its statement
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<Vec<String>>,
    cells: Vec<Cell>,
}

impl Row {
    pub(crate) fn new(columns: Arc<Vec<String>>, cells: Vec<Cell>) -> Self {
        Self { columns, cells }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Decode the value at `idx`
    ///
    /// # Errors
    ///
    /// Returns `FoodError::ParseError` if the index is out of range or the stored value
    /// does not convert to `T`.
    pub fn try_get<T: FromSql>(&self, idx: usize) -> Result<T, FoodError> {
        let cell = self.cells.get(idx).ok_or_else(|| {
            FoodError::ParseError(format!(
                "column index {idx} out of range ({} columns)",
                self.cells.len()
            ))
        })?;
        T::column_result(cell.as_value_ref()).map_err(|e| {
            let name = self.columns.get(idx).map(String::as_str).unwrap_or("?");
            FoodError::ParseError(format!("column {name}: {e}"))
        })
    }

    /// Decode the value of the column called `name`
    ///
    /// # Errors
    ///
    /// Returns `FoodError::ParseError` if no such column exists or conversion fails.
    pub fn try_get_named<T: FromSql>(&self, name: &str) -> Result<T, FoodError> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| FoodError::ParseError(format!("no column named {name}")))?;
        self.try_get(idx)
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

/// Column names plus the rows of one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSet {
    #[serde(serialize_with = "serialize_columns")]
    pub columns: Arc<Vec<String>>,
    pub rows: Vec<Row>,
}

fn serialize_columns<S: Serializer>(columns: &Arc<Vec<String>>, serializer: S) -> Result<S::Ok, S::Error> {
    columns.as_slice().serialize(serializer)
}

impl RowSet {
    pub(crate) fn new(columns: Arc<Vec<String>>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }
}

/// Decode a model from a result row
pub trait FromRow: Sized {
    /// # Errors
    ///
    /// Returns `FoodError::ParseError` when a column is missing or has the wrong type.
    fn from_row(row: &Row) -> Result<Self, FoodError>;
}

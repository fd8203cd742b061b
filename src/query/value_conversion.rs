//! Value conversion utilities for SeaQuery to rusqlite.
//!
//! Converts SeaQuery `Value`s into owned `rusqlite` values, then hands the closure a
//! slice of `ToSql` references to them. The references stay valid for the closure call.

use crate::executor::FoodError;
use rusqlite::types::{ToSql, Value as SqlValue};
use sea_query::Value;

/// Convert a single SeaQuery value to its SQLite storage value.
///
/// Booleans become `0`/`1`; unsigned integers must fit in `i64`.
///
/// # Errors
///
/// Returns `FoodError::Other` if the value type has no SQLite representation here.
pub fn to_sqlite_value(value: &Value) -> Result<SqlValue, FoodError> {
    let converted = match value {
        Value::Bool(Some(b)) => SqlValue::Integer(i64::from(*b)),
        Value::TinyInt(Some(i)) => SqlValue::Integer(i64::from(*i)),
        Value::SmallInt(Some(i)) => SqlValue::Integer(i64::from(*i)),
        Value::Int(Some(i)) => SqlValue::Integer(i64::from(*i)),
        Value::BigInt(Some(i)) => SqlValue::Integer(*i),
        Value::TinyUnsigned(Some(u)) => SqlValue::Integer(i64::from(*u)),
        Value::SmallUnsigned(Some(u)) => SqlValue::Integer(i64::from(*u)),
        Value::Unsigned(Some(u)) => SqlValue::Integer(i64::from(*u)),
        Value::BigUnsigned(Some(u)) => {
            let v = i64::try_from(*u).map_err(|_| {
                FoodError::Other(format!(
                    "BigUnsigned value {} exceeds i64::MAX ({}), cannot be stored",
                    u,
                    i64::MAX
                ))
            })?;
            SqlValue::Integer(v)
        }
        Value::Float(Some(f)) => SqlValue::Real(f64::from(*f)),
        Value::Double(Some(d)) => SqlValue::Real(*d),
        Value::String(Some(s)) => SqlValue::Text(s.to_string()),
        Value::Char(Some(c)) => SqlValue::Text(c.to_string()),
        Value::Bytes(Some(b)) => SqlValue::Blob(b.to_vec()),
        Value::Bool(None)
        | Value::TinyInt(None)
        | Value::SmallInt(None)
        | Value::Int(None)
        | Value::BigInt(None)
        | Value::TinyUnsigned(None)
        | Value::SmallUnsigned(None)
        | Value::Unsigned(None)
        | Value::BigUnsigned(None)
        | Value::Float(None)
        | Value::Double(None)
        | Value::String(None)
        | Value::Char(None)
        | Value::Bytes(None) => SqlValue::Null,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(FoodError::Other(format!(
                "Unsupported value type in query: {:?}",
                value
            )));
        }
    };
    Ok(converted)
}

/// Convert SeaQuery values to rusqlite parameters and run `f` with them.
///
/// # Errors
///
/// Returns `FoodError::Other` if an unsupported value type is encountered, otherwise
/// whatever `f` returns.
pub fn with_converted_params<F, R>(values: &sea_query::Values, f: F) -> Result<R, FoodError>
where
    F: FnOnce(&[&dyn ToSql]) -> Result<R, FoodError>,
{
    let mut converted: Vec<SqlValue> = Vec::new();
    for value in values.iter() {
        converted.push(to_sqlite_value(value)?);
    }

    let params: Vec<&dyn ToSql> = converted.iter().map(|v| v as &dyn ToSql).collect();
    f(&params)
}

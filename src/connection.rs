//! Connection module
//!
//! Opens the SQLite database file that holds the four dashboard tables.
//!
//! This module wraps `rusqlite::Connection::open` and provides:
//! - Database path validation
//! - Busy timeout configuration
//! - Health checks

use rusqlite::Connection;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

/// Busy timeout applied by [`connect`]
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Special path SQLite treats as a private in-memory database
pub const MEMORY_PATH: &str = ":memory:";

/// Connection error type
#[derive(Debug)]
pub enum ConnectionError {
    /// Invalid database path
    InvalidPath(String),
    /// Error reported by SQLite while opening or configuring the connection
    SqliteError(rusqlite::Error),
    /// Other connection errors
    Other(String),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidPath(s) => write!(f, "Invalid database path: {}", s),
            ConnectionError::SqliteError(e) => write!(f, "SQLite error: {}", e),
            ConnectionError::Other(s) => write!(f, "Connection error: {}", s),
        }
    }
}

impl std::error::Error for ConnectionError {}

impl From<rusqlite::Error> for ConnectionError {
    fn from(err: rusqlite::Error) -> Self {
        ConnectionError::SqliteError(err)
    }
}

/// Opens the SQLite database at `path`, creating the file if it does not exist
///
/// The parent directory must already exist; use
/// [`initialize`](crate::loader::initialize) to create it as part of start-up.
///
/// # Examples
///
/// ```no_run
/// use foodlink::connection::connect;
/// use std::path::Path;
///
/// let conn = connect(Path::new("dataset/food_wastage.db"))?;
/// # Ok::<(), foodlink::connection::ConnectionError>(())
/// ```
pub fn connect(path: &Path) -> Result<Connection, ConnectionError> {
    connect_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
}

/// Same as [`connect`] with an explicit busy timeout
pub fn connect_with_timeout(path: &Path, busy_timeout: Duration) -> Result<Connection, ConnectionError> {
    let start = Instant::now();

    validate_database_path(path)?;

    let conn = if path.as_os_str() == MEMORY_PATH {
        Connection::open_in_memory()?
    } else {
        Connection::open(path)?
    };
    conn.busy_timeout(busy_timeout)?;

    log::debug!("opened {} in {:?}", path.display(), start.elapsed());
    Ok(conn)
}

/// Validates a database path
///
/// Rejects empty paths, paths naming an existing directory, and paths whose parent
/// directory does not exist. `:memory:` is always accepted.
pub fn validate_database_path(path: &Path) -> Result<(), ConnectionError> {
    if path.as_os_str().is_empty() {
        return Err(ConnectionError::InvalidPath(
            "Database path cannot be empty".to_string(),
        ));
    }

    if path.as_os_str() == MEMORY_PATH {
        return Ok(());
    }

    if path.is_dir() {
        return Err(ConnectionError::InvalidPath(format!(
            "{} is a directory, expected a database file",
            path.display()
        )));
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(ConnectionError::InvalidPath(format!(
                "directory {} does not exist",
                parent.display()
            )))
        }
        _ => Ok(()),
    }
}

/// Runs `SELECT 1` and reports whether the connection answered as expected
pub fn check_connection_health(conn: &Connection) -> Result<bool, rusqlite::Error> {
    let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0))?;
    Ok(one == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_database_path_valid() {
        let dir = TempDir::new().unwrap();
        let valid = vec![
            dir.path().join("food_wastage.db"),
            Path::new(MEMORY_PATH).to_path_buf(),
            Path::new("relative.db").to_path_buf(),
        ];

        for p in valid {
            assert!(validate_database_path(&p).is_ok(), "Should validate: {}", p.display());
        }
    }

    #[test]
    fn test_validate_database_path_invalid() {
        let dir = TempDir::new().unwrap();
        let invalid = vec![
            Path::new("").to_path_buf(),
            dir.path().to_path_buf(),
            dir.path().join("missing").join("food_wastage.db"),
        ];

        for p in invalid {
            assert!(validate_database_path(&p).is_err(), "Should reject: {}", p.display());
        }
    }

    #[test]
    fn test_connect_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("food_wastage.db");
        let conn = connect(&path).unwrap();
        assert!(check_connection_health(&conn).unwrap());
        assert!(path.exists());
    }

    #[test]
    fn test_connection_error_display() {
        let err = ConnectionError::InvalidPath("test".to_string());
        assert!(err.to_string().contains("Invalid database path"));
    }
}

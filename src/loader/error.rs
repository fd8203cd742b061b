//! Loader error types

use crate::connection::ConnectionError;
use crate::FoodError;
use std::path::PathBuf;

/// Errors raised while initializing the database from CSV sources
#[derive(Debug)]
pub enum LoadError {
    /// Database execution error
    Database(FoodError),
    /// Could not open the database file
    Connection(ConnectionError),
    /// A CSV file is malformed or holds a row that breaks a domain rule
    Csv { file: PathBuf, message: String },
    /// Filesystem error, e.g. the database directory cannot be created
    Io { path: PathBuf, source: std::io::Error },
}

impl LoadError {
    pub(crate) fn csv(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LoadError::Csv {
            file: file.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Database(e) => write!(f, "Database error: {}", e),
            LoadError::Connection(e) => write!(f, "Connection error: {}", e),
            LoadError::Csv { file, message } => {
                write!(f, "Malformed CSV {}: {}", file.display(), message)
            }
            LoadError::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Database(e) => Some(e),
            LoadError::Connection(e) => Some(e),
            LoadError::Io { source, .. } => Some(source),
            LoadError::Csv { .. } => None,
        }
    }
}

impl From<FoodError> for LoadError {
    fn from(err: FoodError) -> Self {
        LoadError::Database(err)
    }
}

impl From<ConnectionError> for LoadError {
    fn from(err: ConnectionError) -> Self {
        LoadError::Connection(err)
    }
}

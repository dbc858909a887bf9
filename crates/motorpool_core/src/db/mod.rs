//! SQLite storage bootstrap for the motorpool core.
//!
//! # Responsibility
//! - Define the connection-provider capability repositories consume.
//! - Provision the schema before any connection reaches application code.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No repository touches data on a connection whose migrations have not
//!   succeeded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
pub mod provider;

pub use provider::{ConnectionProvider, FileConnectionProvider, MemoryConnectionProvider};

pub type DbResult<T> = Result<T, DbError>;

/// Connection-level failure: the driver itself, or a schema this binary does
/// not understand.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

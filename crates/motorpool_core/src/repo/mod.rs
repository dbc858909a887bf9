//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the data-access contracts for cars, drivers and manufacturers.
//! - Keep SQL statement details inside the persistence boundary.
//!
//! # Invariants
//! - Every operation acquires its own scoped connection(s) from the injected
//!   provider and releases them on all exit paths.
//! - Every failure surfaces as one [`StorageError`] naming the operation and
//!   the entity involved.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod car_repo;
pub mod driver_repo;
pub mod manufacturer_repo;

pub type RepoResult<T> = Result<T, StorageError>;

/// Storage failure wrapping the underlying driver error with call-site
/// context.
///
/// The single error kind of the repository layer: no transient/permanent
/// distinction and no retry policy, the caller receives the chain as-is.
#[derive(Debug)]
pub struct StorageError {
    message: String,
    source: DbError,
}

impl StorageError {
    pub(crate) fn wrap(message: impl Into<String>, source: impl Into<DbError>) -> Self {
        Self {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Human-readable operation context, e.g. `can't get car by id 7`.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.message, self.source)
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

//! Connection acquisition for SQLite storage.
//!
//! # Responsibility
//! - Hand out one ready connection per repository call.
//! - Configure connection pragmas and schema state before a connection is
//!   visible to callers.
//!
//! # Invariants
//! - Acquired connections have `foreign_keys=ON` and all migrations applied.
//! - Releasing a connection is dropping it: there is no pool and no explicit
//!   close path.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{debug, error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static MEMORY_DB_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Capability consumed by every repository: yields one live connection per
/// call.
///
/// Acquisition is scoped — the caller owns the returned [`Connection`] and
/// releases it by dropping it, on success and failure paths alike. Pooling,
/// retry and credentials are outside this contract.
pub trait ConnectionProvider {
    /// Opens a ready connection, failing if none can be established.
    fn acquire(&self) -> DbResult<Connection>;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    fn acquire(&self) -> DbResult<Connection> {
        (**self).acquire()
    }
}

/// Provider backed by a SQLite database file.
///
/// Each `acquire` opens a fresh connection to the same file; the database is
/// bootstrapped once at construction so schema problems surface early.
#[derive(Debug)]
pub struct FileConnectionProvider {
    path: PathBuf,
}

impl FileConnectionProvider {
    /// Opens (creating if needed) and bootstraps the database at `path`.
    ///
    /// # Side effects
    /// - Applies pending migrations.
    /// - Emits `db_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start mode=file");

        match open_ready(path.as_ref()) {
            Ok(_conn) => {
                info!(
                    "event=db_open module=db status=ok mode=file duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    path: path.as_ref().to_path_buf(),
                })
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl ConnectionProvider for FileConnectionProvider {
    fn acquire(&self) -> DbResult<Connection> {
        acquire_ready(&self.path, "file")
    }
}

/// Provider backed by a process-private in-memory database.
///
/// Uses a uniquely named shared-cache database so that sequential
/// acquisitions observe the same data; a keeper connection pins the database
/// for the provider's lifetime.
pub struct MemoryConnectionProvider {
    uri: String,
    _keeper: Connection,
}

impl MemoryConnectionProvider {
    /// Creates and bootstraps a fresh in-memory database.
    ///
    /// # Side effects
    /// - Applies all migrations.
    /// - Emits `db_open` logging events with duration and status.
    pub fn open() -> DbResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start mode=memory");

        let sequence = MEMORY_DB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let uri = format!(
            "file:motorpool-mem-{}-{sequence}?mode=memory&cache=shared",
            std::process::id()
        );
        match open_ready(&uri) {
            Ok(keeper) => {
                info!(
                    "event=db_open module=db status=ok mode=memory duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    uri,
                    _keeper: keeper,
                })
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl ConnectionProvider for MemoryConnectionProvider {
    fn acquire(&self) -> DbResult<Connection> {
        acquire_ready(&self.uri, "memory")
    }
}

fn acquire_ready(target: impl AsRef<Path>, mode: &str) -> DbResult<Connection> {
    let started_at = Instant::now();
    match open_ready(target) {
        Ok(conn) => {
            debug!(
                "event=db_acquire module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_acquire module=db status=error mode={mode} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn open_ready(target: impl AsRef<Path>) -> DbResult<Connection> {
    let mut conn = Connection::open(target)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

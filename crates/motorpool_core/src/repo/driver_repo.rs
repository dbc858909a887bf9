//! Driver repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the CRUD surface over `drivers`; the car side only links rows
//!   created here.
//!
//! # Invariants
//! - Read paths exclude soft-deleted drivers.
//! - Delete sets the tombstone flag; link rows in `cars_drivers` stay in
//!   place and drop out of car hydration instead.

use crate::db::{ConnectionProvider, DbResult};
use crate::model::driver::{Driver, DriverId};
use crate::repo::{RepoResult, StorageError};
use rusqlite::{params, Row};

const DRIVER_SELECT_SQL: &str = "SELECT
    d.id AS id,
    d.name AS name,
    d.license_number AS license_number
FROM drivers d";

/// Repository interface for driver persistence.
pub trait DriverRepository {
    /// Inserts one driver row.
    ///
    /// Returns the driver with the generated id populated, or with `id: None`
    /// when storage reports no generated key.
    fn create_driver(&self, driver: Driver) -> RepoResult<Driver>;

    /// Loads one non-deleted driver.
    fn get_driver(&self, id: DriverId) -> RepoResult<Option<Driver>>;

    /// Loads all non-deleted drivers in storage order.
    fn list_drivers(&self) -> RepoResult<Vec<Driver>>;

    /// Rewrites name and license number for the driver's id.
    ///
    /// A missing or already-deleted id matches nothing; the affected count is
    /// ignored either way.
    fn update_driver(&self, driver: &Driver) -> RepoResult<()>;

    /// Soft-deletes the driver row.
    ///
    /// Returns `true` iff the id existed, whatever its flag state was.
    fn delete_driver(&self, id: DriverId) -> RepoResult<bool>;
}

/// SQLite-backed driver repository.
pub struct SqliteDriverRepository<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteDriverRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn try_create(&self, mut driver: Driver) -> DbResult<Driver> {
        let conn = self.provider.acquire()?;
        conn.execute(
            "INSERT INTO drivers (name, license_number) VALUES (?1, ?2);",
            params![driver.name, driver.license_number],
        )?;

        let generated = conn.last_insert_rowid();
        if generated != 0 {
            driver.id = Some(generated);
        }
        Ok(driver)
    }

    fn try_get(&self, id: DriverId) -> DbResult<Option<Driver>> {
        let conn = self.provider.acquire()?;
        let mut stmt = conn.prepare(&format!(
            "{DRIVER_SELECT_SQL}
             WHERE d.id = ?1
               AND d.is_deleted = 0;"
        ))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_driver_row(row)?)),
            None => Ok(None),
        }
    }

    fn try_list(&self) -> DbResult<Vec<Driver>> {
        let conn = self.provider.acquire()?;
        let mut stmt = conn.prepare(&format!(
            "{DRIVER_SELECT_SQL}
             WHERE d.is_deleted = 0;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut drivers = Vec::new();
        while let Some(row) = rows.next()? {
            drivers.push(parse_driver_row(row)?);
        }
        Ok(drivers)
    }

    fn try_update(&self, driver: &Driver) -> DbResult<()> {
        let conn = self.provider.acquire()?;
        conn.execute(
            "UPDATE drivers
             SET name = ?1, license_number = ?2
             WHERE id = ?3
               AND is_deleted = 0;",
            params![driver.name, driver.license_number, driver.id],
        )?;
        Ok(())
    }

    fn try_delete(&self, id: DriverId) -> DbResult<bool> {
        let conn = self.provider.acquire()?;
        let changed = conn.execute(
            "UPDATE drivers SET is_deleted = 1 WHERE id = ?1;",
            params![id],
        )?;
        Ok(changed == 1)
    }
}

impl<P: ConnectionProvider> DriverRepository for SqliteDriverRepository<P> {
    fn create_driver(&self, driver: Driver) -> RepoResult<Driver> {
        let name = driver.name.clone();
        self.try_create(driver)
            .map_err(|err| StorageError::wrap(format!("can't create driver `{name}`"), err))
    }

    fn get_driver(&self, id: DriverId) -> RepoResult<Option<Driver>> {
        self.try_get(id)
            .map_err(|err| StorageError::wrap(format!("can't get driver by id {id}"), err))
    }

    fn list_drivers(&self) -> RepoResult<Vec<Driver>> {
        self.try_list()
            .map_err(|err| StorageError::wrap("can't list drivers", err))
    }

    fn update_driver(&self, driver: &Driver) -> RepoResult<()> {
        self.try_update(driver)
            .map_err(|err| StorageError::wrap(format!("can't update driver `{}`", driver.name), err))
    }

    fn delete_driver(&self, id: DriverId) -> RepoResult<bool> {
        self.try_delete(id)
            .map_err(|err| StorageError::wrap(format!("can't delete driver by id {id}"), err))
    }
}

fn parse_driver_row(row: &Row<'_>) -> DbResult<Driver> {
    Ok(Driver {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        license_number: row.get("license_number")?,
    })
}

//! Manufacturer repository contract and SQLite implementation.
//!
//! Manufacturers carry no soft-delete flag, so the contract has no delete
//! operation; car rows keep referencing their maker for as long as they live.

use crate::db::{ConnectionProvider, DbResult};
use crate::model::manufacturer::{Manufacturer, ManufacturerId};
use crate::repo::{RepoResult, StorageError};
use rusqlite::{params, Row};

const MANUFACTURER_SELECT_SQL: &str = "SELECT
    m.id AS id,
    m.name AS name,
    m.country AS country
FROM manufacturers m";

/// Repository interface for manufacturer persistence.
pub trait ManufacturerRepository {
    /// Inserts one manufacturer row.
    ///
    /// Returns the manufacturer with the generated id populated, or with
    /// `id: None` when storage reports no generated key.
    fn create_manufacturer(&self, manufacturer: Manufacturer) -> RepoResult<Manufacturer>;

    /// Loads one manufacturer by id.
    fn get_manufacturer(&self, id: ManufacturerId) -> RepoResult<Option<Manufacturer>>;

    /// Loads all manufacturers in storage order.
    fn list_manufacturers(&self) -> RepoResult<Vec<Manufacturer>>;

    /// Rewrites name and country for the manufacturer's id.
    ///
    /// A missing id matches nothing; the affected count is ignored.
    fn update_manufacturer(&self, manufacturer: &Manufacturer) -> RepoResult<()>;
}

/// SQLite-backed manufacturer repository.
pub struct SqliteManufacturerRepository<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteManufacturerRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn try_create(&self, mut manufacturer: Manufacturer) -> DbResult<Manufacturer> {
        let conn = self.provider.acquire()?;
        conn.execute(
            "INSERT INTO manufacturers (name, country) VALUES (?1, ?2);",
            params![manufacturer.name, manufacturer.country],
        )?;

        let generated = conn.last_insert_rowid();
        if generated != 0 {
            manufacturer.id = Some(generated);
        }
        Ok(manufacturer)
    }

    fn try_get(&self, id: ManufacturerId) -> DbResult<Option<Manufacturer>> {
        let conn = self.provider.acquire()?;
        let mut stmt = conn.prepare(&format!(
            "{MANUFACTURER_SELECT_SQL}
             WHERE m.id = ?1;"
        ))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_manufacturer_row(row)?)),
            None => Ok(None),
        }
    }

    fn try_list(&self) -> DbResult<Vec<Manufacturer>> {
        let conn = self.provider.acquire()?;
        let mut stmt = conn.prepare(&format!("{MANUFACTURER_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut manufacturers = Vec::new();
        while let Some(row) = rows.next()? {
            manufacturers.push(parse_manufacturer_row(row)?);
        }
        Ok(manufacturers)
    }

    fn try_update(&self, manufacturer: &Manufacturer) -> DbResult<()> {
        let conn = self.provider.acquire()?;
        conn.execute(
            "UPDATE manufacturers
             SET name = ?1, country = ?2
             WHERE id = ?3;",
            params![manufacturer.name, manufacturer.country, manufacturer.id],
        )?;
        Ok(())
    }
}

impl<P: ConnectionProvider> ManufacturerRepository for SqliteManufacturerRepository<P> {
    fn create_manufacturer(&self, manufacturer: Manufacturer) -> RepoResult<Manufacturer> {
        let name = manufacturer.name.clone();
        self.try_create(manufacturer)
            .map_err(|err| StorageError::wrap(format!("can't create manufacturer `{name}`"), err))
    }

    fn get_manufacturer(&self, id: ManufacturerId) -> RepoResult<Option<Manufacturer>> {
        self.try_get(id)
            .map_err(|err| StorageError::wrap(format!("can't get manufacturer by id {id}"), err))
    }

    fn list_manufacturers(&self) -> RepoResult<Vec<Manufacturer>> {
        self.try_list()
            .map_err(|err| StorageError::wrap("can't list manufacturers", err))
    }

    fn update_manufacturer(&self, manufacturer: &Manufacturer) -> RepoResult<()> {
        self.try_update(manufacturer).map_err(|err| {
            StorageError::wrap(
                format!("can't update manufacturer `{}`", manufacturer.name),
                err,
            )
        })
    }
}

fn parse_manufacturer_row(row: &Row<'_>) -> DbResult<Manufacturer> {
    Ok(Manufacturer {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        country: row.get("country")?,
    })
}

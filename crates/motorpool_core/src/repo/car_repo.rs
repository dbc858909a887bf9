//! Car repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the CRUD surface over `cars` and its `cars_drivers` link rows.
//! - Keep join-table ownership inside the car aggregate: reads hydrate the
//!   full driver list, updates replace it wholesale.
//!
//! # Invariants
//! - Read paths exclude soft-deleted cars and soft-deleted drivers.
//! - Delete sets the tombstone flag and never touches link rows or drivers.
//! - No existence pre-checks: a dangling manufacturer or driver reference
//!   fails at the schema constraint, not before.

use crate::db::{ConnectionProvider, DbResult};
use crate::model::car::{Car, CarId};
use crate::model::driver::{Driver, DriverId};
use crate::model::manufacturer::Manufacturer;
use crate::repo::{RepoResult, StorageError};
use rusqlite::{params, Connection, Row, TransactionBehavior};

const CAR_SELECT_SQL: &str = "SELECT
    c.id AS id,
    c.model AS model,
    m.id AS manufacturer_id,
    m.name AS manufacturer_name,
    m.country AS manufacturer_country
FROM cars c
INNER JOIN manufacturers m ON m.id = c.manufacturer_id";

/// Repository interface for car persistence.
pub trait CarRepository {
    /// Inserts one car row and links its attached drivers, in list order.
    ///
    /// Returns the car with the generated id populated. When storage reports
    /// no generated key the car comes back with `id: None` and no links are
    /// written — a soft outcome, not an error.
    fn create_car(&self, car: Car) -> RepoResult<Car>;

    /// Loads one non-deleted car with its manufacturer and driver list.
    ///
    /// Drivers arrive in storage order; no ordering is guaranteed.
    fn get_car(&self, id: CarId) -> RepoResult<Option<Car>>;

    /// Loads all non-deleted cars, each hydrated like
    /// [`CarRepository::get_car`].
    fn list_cars(&self) -> RepoResult<Vec<Car>>;

    /// Rewrites model and manufacturer for the car's id and replaces its
    /// driver links with the current list.
    ///
    /// A missing or already-deleted id is not an error: the row update
    /// matches nothing and its count is ignored, while the link replacement
    /// still runs.
    fn update_car(&self, car: &Car) -> RepoResult<()>;

    /// Soft-deletes the car row, leaving link rows and drivers untouched.
    ///
    /// Returns `true` iff the id existed, whatever its flag state was.
    fn delete_car(&self, id: CarId) -> RepoResult<bool>;

    /// Loads every non-deleted car linked to the driver, each re-fetched
    /// through the full [`CarRepository::get_car`] path.
    fn list_cars_by_driver(&self, driver_id: DriverId) -> RepoResult<Vec<Car>>;
}

/// SQLite-backed car repository.
///
/// Holds the provider injected at construction; every operation acquires and
/// releases its own scoped connection(s).
pub struct SqliteCarRepository<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteCarRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn try_create(&self, mut car: Car) -> DbResult<Car> {
        let mut conn = self.provider.acquire()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO cars (model, manufacturer_id) VALUES (?1, ?2);",
            params![car.model, car.manufacturer.id],
        )?;

        // Rowid 0 means the connection reported no generated key.
        let generated = tx.last_insert_rowid();
        if generated == 0 {
            tx.commit()?;
            return Ok(car);
        }

        car.id = Some(generated);
        insert_driver_links(&tx, car.id, &car.drivers)?;
        tx.commit()?;
        Ok(car)
    }

    fn try_get(&self, id: CarId) -> DbResult<Option<Car>> {
        let found = {
            let conn = self.provider.acquire()?;
            let mut stmt = conn.prepare(&format!(
                "{CAR_SELECT_SQL}
                 WHERE c.id = ?1
                   AND c.is_deleted = 0;"
            ))?;
            let mut rows = stmt.query(params![id])?;
            match rows.next()? {
                Some(row) => Some(parse_car_row(row)?),
                None => None,
            }
        };

        match found {
            Some(mut car) => {
                car.drivers = self.load_drivers_for_car(id)?;
                Ok(Some(car))
            }
            None => Ok(None),
        }
    }

    fn try_list(&self) -> DbResult<Vec<Car>> {
        let mut cars = {
            let conn = self.provider.acquire()?;
            let mut stmt = conn.prepare(&format!(
                "{CAR_SELECT_SQL}
                 WHERE c.is_deleted = 0;"
            ))?;
            let mut rows = stmt.query([])?;
            let mut cars = Vec::new();
            while let Some(row) = rows.next()? {
                cars.push(parse_car_row(row)?);
            }
            cars
        };

        for car in &mut cars {
            if let Some(id) = car.id {
                car.drivers = self.load_drivers_for_car(id)?;
            }
        }
        Ok(cars)
    }

    fn try_update(&self, car: &Car) -> DbResult<()> {
        let mut conn = self.provider.acquire()?;
        conn.execute(
            "UPDATE cars
             SET model = ?1, manufacturer_id = ?2
             WHERE id = ?3
               AND is_deleted = 0;",
            params![car.model, car.manufacturer.id, car.id],
        )?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "DELETE FROM cars_drivers WHERE car_id = ?1;",
            params![car.id],
        )?;
        insert_driver_links(&tx, car.id, &car.drivers)?;
        tx.commit()?;
        Ok(())
    }

    fn try_delete(&self, id: CarId) -> DbResult<bool> {
        let conn = self.provider.acquire()?;
        let changed = conn.execute(
            "UPDATE cars SET is_deleted = 1 WHERE id = ?1;",
            params![id],
        )?;
        Ok(changed == 1)
    }

    fn try_list_by_driver(&self, driver_id: DriverId) -> DbResult<Vec<Car>> {
        let car_ids = {
            let conn = self.provider.acquire()?;
            let mut stmt = conn.prepare(
                "SELECT cd.car_id
                 FROM cars_drivers cd
                 INNER JOIN cars c ON c.id = cd.car_id
                 WHERE cd.driver_id = ?1
                   AND c.is_deleted = 0;",
            )?;
            let mut rows = stmt.query(params![driver_id])?;
            let mut ids: Vec<CarId> = Vec::new();
            while let Some(row) = rows.next()? {
                ids.push(row.get(0)?);
            }
            ids
        };

        let mut cars = Vec::new();
        for car_id in car_ids {
            // A car deleted between the scan and the re-fetch is skipped.
            if let Some(car) = self.try_get(car_id)? {
                cars.push(car);
            }
        }
        Ok(cars)
    }

    fn load_drivers_for_car(&self, car_id: CarId) -> DbResult<Vec<Driver>> {
        let conn = self.provider.acquire()?;
        let mut stmt = conn.prepare(
            "SELECT
                d.id AS id,
                d.name AS name,
                d.license_number AS license_number
             FROM drivers d
             INNER JOIN cars_drivers cd ON cd.driver_id = d.id
             WHERE cd.car_id = ?1
               AND d.is_deleted = 0;",
        )?;
        let mut rows = stmt.query(params![car_id])?;
        let mut drivers = Vec::new();
        while let Some(row) = rows.next()? {
            drivers.push(parse_driver_row(row)?);
        }
        Ok(drivers)
    }
}

impl<P: ConnectionProvider> CarRepository for SqliteCarRepository<P> {
    fn create_car(&self, car: Car) -> RepoResult<Car> {
        let model = car.model.clone();
        self.try_create(car)
            .map_err(|err| StorageError::wrap(format!("can't create car `{model}`"), err))
    }

    fn get_car(&self, id: CarId) -> RepoResult<Option<Car>> {
        self.try_get(id)
            .map_err(|err| StorageError::wrap(format!("can't get car by id {id}"), err))
    }

    fn list_cars(&self) -> RepoResult<Vec<Car>> {
        self.try_list()
            .map_err(|err| StorageError::wrap("can't list cars", err))
    }

    fn update_car(&self, car: &Car) -> RepoResult<()> {
        self.try_update(car)
            .map_err(|err| StorageError::wrap(format!("can't update car `{}`", car.model), err))
    }

    fn delete_car(&self, id: CarId) -> RepoResult<bool> {
        self.try_delete(id)
            .map_err(|err| StorageError::wrap(format!("can't delete car by id {id}"), err))
    }

    fn list_cars_by_driver(&self, driver_id: DriverId) -> RepoResult<Vec<Car>> {
        self.try_list_by_driver(driver_id).map_err(|err| {
            StorageError::wrap(format!("can't list cars for driver with id {driver_id}"), err)
        })
    }
}

fn insert_driver_links(conn: &Connection, car_id: Option<CarId>, drivers: &[Driver]) -> DbResult<()> {
    let mut stmt = conn.prepare("INSERT INTO cars_drivers (car_id, driver_id) VALUES (?1, ?2);")?;
    for driver in drivers {
        stmt.execute(params![car_id, driver.id])?;
    }
    Ok(())
}

fn parse_car_row(row: &Row<'_>) -> DbResult<Car> {
    let manufacturer = Manufacturer {
        id: Some(row.get("manufacturer_id")?),
        name: row.get("manufacturer_name")?,
        country: row.get("manufacturer_country")?,
    };
    Ok(Car {
        id: Some(row.get("id")?),
        model: row.get("model")?,
        manufacturer,
        drivers: Vec::new(),
    })
}

fn parse_driver_row(row: &Row<'_>) -> DbResult<Driver> {
    Ok(Driver {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        license_number: row.get("license_number")?,
    })
}

//! Data-access core for the motorpool car-rental backend.
//!
//! This crate is the persistence boundary: it maps [`Car`], [`Driver`] and
//! [`Manufacturer`] values onto four SQLite relations and back. Repositories
//! are constructed over a [`ConnectionProvider`] and acquire one scoped
//! connection per call; everything above them (services, wiring, transport)
//! lives elsewhere.
//!
//! ```no_run
//! use motorpool_core::{
//!     Car, CarRepository, Manufacturer, ManufacturerRepository,
//!     MemoryConnectionProvider, SqliteCarRepository, SqliteManufacturerRepository,
//! };
//!
//! let provider = MemoryConnectionProvider::open()?;
//! let manufacturers = SqliteManufacturerRepository::new(&provider);
//! let cars = SqliteCarRepository::new(&provider);
//!
//! let toyota = manufacturers.create_manufacturer(Manufacturer::new("Toyota", "Japan"))?;
//! let corolla = cars.create_car(Car::new("Corolla", toyota))?;
//! assert!(corolla.id.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{
    ConnectionProvider, DbError, DbResult, FileConnectionProvider, MemoryConnectionProvider,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::car::{Car, CarId};
pub use model::driver::{Driver, DriverId};
pub use model::manufacturer::{Manufacturer, ManufacturerId};
pub use repo::car_repo::{CarRepository, SqliteCarRepository};
pub use repo::driver_repo::{DriverRepository, SqliteDriverRepository};
pub use repo::manufacturer_repo::{ManufacturerRepository, SqliteManufacturerRepository};
pub use repo::{RepoResult, StorageError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

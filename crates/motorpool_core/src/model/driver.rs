//! Driver domain model.
//!
//! Drivers are created and maintained through their own repository; the car
//! side only links existing driver rows.

use serde::{Deserialize, Serialize};

/// Storage-assigned driver identifier.
pub type DriverId = i64;

/// Licensed driver that can be linked to any number of cars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// `None` until the row is inserted.
    pub id: Option<DriverId>,
    pub name: String,
    pub license_number: String,
}

impl Driver {
    /// Creates a driver that has not been persisted yet.
    pub fn new(name: impl Into<String>, license_number: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            license_number: license_number.into(),
        }
    }

    /// Creates a driver for an already-persisted row.
    pub fn with_id(
        id: DriverId,
        name: impl Into<String>,
        license_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            license_number: license_number.into(),
        }
    }
}

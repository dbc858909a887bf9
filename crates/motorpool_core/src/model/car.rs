//! Car aggregate model.
//!
//! # Responsibility
//! - Carry one car row together with its manufacturer and linked drivers.
//!
//! # Invariants
//! - A car references exactly one manufacturer, which must already be
//!   persisted before the car row can be inserted.
//! - The driver list is owned wholesale by the car: updates replace the whole
//!   link set, never diff it.

use crate::model::driver::Driver;
use crate::model::manufacturer::Manufacturer;
use serde::{Deserialize, Serialize};

/// Storage-assigned car identifier.
pub type CarId = i64;

/// Car row hydrated with its manufacturer and current driver links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// `None` until the row is inserted.
    pub id: Option<CarId>,
    pub model: String,
    /// Owning manufacturer, loaded alongside the car on every read.
    pub manufacturer: Manufacturer,
    /// Linked drivers in storage order. May be empty.
    pub drivers: Vec<Driver>,
}

impl Car {
    /// Creates a car that has not been persisted yet, with no drivers linked.
    pub fn new(model: impl Into<String>, manufacturer: Manufacturer) -> Self {
        Self {
            id: None,
            model: model.into(),
            manufacturer,
            drivers: Vec::new(),
        }
    }

    /// Creates a car that has not been persisted yet with drivers attached.
    pub fn with_drivers(
        model: impl Into<String>,
        manufacturer: Manufacturer,
        drivers: Vec<Driver>,
    ) -> Self {
        Self {
            id: None,
            model: model.into(),
            manufacturer,
            drivers,
        }
    }
}

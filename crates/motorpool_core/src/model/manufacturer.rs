//! Manufacturer domain model.

use serde::{Deserialize, Serialize};

/// Storage-assigned manufacturer identifier.
pub type ManufacturerId = i64;

/// Car maker referenced by every [`Car`](crate::model::car::Car).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    /// `None` until the row is inserted.
    pub id: Option<ManufacturerId>,
    pub name: String,
    pub country: String,
}

impl Manufacturer {
    /// Creates a manufacturer that has not been persisted yet.
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            country: country.into(),
        }
    }

    /// Creates a manufacturer for an already-persisted row.
    pub fn with_id(
        id: ManufacturerId,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            country: country.into(),
        }
    }
}

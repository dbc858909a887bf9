//! Domain entities persisted by the motorpool storage core.
//!
//! # Responsibility
//! - Define the canonical car/driver/manufacturer shapes shared by all
//!   repository contracts.
//!
//! # Invariants
//! - Identifiers are storage-assigned: `None` until the row is inserted,
//!   immutable afterwards.
//! - Soft-delete state lives in storage only and is never carried on an
//!   entity.

pub mod car;
pub mod driver;
pub mod manufacturer;

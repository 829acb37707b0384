//! Domain layer for Weathervane
//!
//! Contains the core vocabulary of the system: observations, the feature
//! schema, the label encoder, and validated measurement value objects.
//! This layer has no I/O and no external service dependencies.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

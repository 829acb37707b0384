//! Application layer - Use cases and orchestration
//!
//! Contains training and prediction use cases plus the port definitions
//! the infrastructure adapters implement. Orchestrates domain objects and
//! the classifier core; performs no I/O of its own.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;

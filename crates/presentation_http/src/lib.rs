//! Weathervane HTTP presentation layer
//!
//! Serves the prediction form, the JSON prediction API and the live
//! city endpoint.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod templates;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

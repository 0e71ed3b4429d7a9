//! Domain models for the AgriAir platform
//!
//! Re-exports models from the shared crate so handlers and services have a
//! single import path.

pub use shared::models::*;
pub use shared::types::{GpsCoordinates, LocationContext, Pagination};

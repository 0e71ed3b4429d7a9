//! Shared types and models for the AgriAir farming advisory platform
//!
//! This crate contains the pure domain logic shared between the backend and
//! the browser (via WASM): models, the crop knowledge table, the weather
//! advisory rules, and the crop suggestion engine.

pub mod knowledge;
pub mod models;
pub mod suggestions;
pub mod types;
pub mod validation;

pub use knowledge::*;
pub use models::*;
pub use suggestions::*;
pub use types::*;
pub use validation::*;

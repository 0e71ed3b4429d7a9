//! Domain models for the AgriAir platform

mod advisory;
mod crop;
mod report;
mod user;
mod weather;

pub use advisory::*;
pub use crop::*;
pub use report::*;
pub use user::*;
pub use weather::*;

//! HTTP handlers

pub mod admin;
pub mod advisory;
pub mod auth;
pub mod crop;
pub mod dashboard;
pub mod health;
pub mod report;
pub mod reporting;

pub use admin::*;
pub use advisory::*;
pub use auth::*;
pub use crop::*;
pub use dashboard::*;
pub use health::*;
pub use report::*;
pub use reporting::*;

//! Business logic services for the AgriAir platform

pub mod admin;
pub mod advisory;
pub mod auth;
pub mod crop;
pub mod dashboard;
pub mod knowledge;
pub mod location;
pub mod profile;
pub mod report;
pub mod reporting;
pub mod weather;

pub use admin::AdminService;
pub use advisory::AdvisoryService;
pub use auth::AuthService;
pub use crop::CropService;
pub use dashboard::DashboardService;
pub use knowledge::KnowledgeService;
pub use location::LocationService;
pub use profile::ProfileService;
pub use report::ReportService;
pub use reporting::ReportingService;
pub use weather::WeatherService;

//! Pollution report models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UnknownVariant;

/// A pollution issue reported by a farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutionReport {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    /// e.g. village name or coordinates
    pub location: String,
    pub image_url: Option<String>,
    pub status: ReportStatus,
    pub date_reported: DateTime<Utc>,
}

/// Moderation status of a pollution report. Only admins change it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    #[default]
    Pending,
    Reviewed,
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::Reviewed,
        ReportStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::Reviewed => "REVIEWED",
            ReportStatus::Resolved => "RESOLVED",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "Pending"),
            ReportStatus::Reviewed => write!(f, "Reviewed"),
            ReportStatus::Resolved => write!(f, "Resolved"),
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("status", s))
    }
}

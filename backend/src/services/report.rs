//! Pollution report service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{PollutionReport, ReportStatus};

/// Pollution report service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct ReportRow {
    id: Uuid,
    user_id: Option<Uuid>,
    title: String,
    description: String,
    location: String,
    image_url: Option<String>,
    status: String,
    date_reported: DateTime<Utc>,
}

impl TryFrom<ReportRow> for PollutionReport {
    type Error = AppError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ReportStatus>()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(PollutionReport {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            location: row.location,
            image_url: row.image_url,
            status,
            date_reported: row.date_reported,
        })
    }
}

/// Input for filing a report
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportInput {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: String,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

const REPORT_COLUMNS: &str =
    "id, user_id, title, description, location, image_url, status, date_reported";

impl ReportService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// File a report; it always starts PENDING
    pub async fn create(&self, user_id: Uuid, input: CreateReportInput) -> AppResult<PollutionReport> {
        input.validate()?;

        let row = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            INSERT INTO pollution_reports (user_id, title, description, location, image_url, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(user_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.location)
        .bind(&input.image_url)
        .bind(ReportStatus::Pending.as_str())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(report_id = %row.id, %user_id, "Pollution report filed");
        row.try_into()
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<PollutionReport>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {} FROM pollution_reports WHERE user_id = $1 ORDER BY date_reported DESC",
            REPORT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(PollutionReport::try_from).collect()
    }

    /// All reports, newest first
    pub async fn list_all(&self, limit: Option<i64>) -> AppResult<Vec<PollutionReport>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {} FROM pollution_reports ORDER BY date_reported DESC LIMIT $1",
            REPORT_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(PollutionReport::try_from).collect()
    }

    /// Moderate a report. Only the three known statuses are accepted.
    pub async fn set_status(&self, report_id: Uuid, status: &str) -> AppResult<PollutionReport> {
        let status = status
            .parse::<ReportStatus>()
            .map_err(|e| AppError::validation("status", e.to_string()))?;

        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "UPDATE pollution_reports SET status = $2 WHERE id = $1 RETURNING {}",
            REPORT_COLUMNS
        ))
        .bind(report_id)
        .bind(status.as_str())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Report".to_string()))?;

        tracing::info!(%report_id, status = %status.as_str(), "Report status updated");
        row.try_into()
    }

    /// (total, pending)
    pub async fn counts(&self) -> AppResult<(i64, i64)> {
        let counts = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'PENDING')
            FROM pollution_reports
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(counts)
    }
}

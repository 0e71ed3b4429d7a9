//! Persisted advisory service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Advisory, AdvisoryOrigin, Severity};

/// Advisory service
#[derive(Clone)]
pub struct AdvisoryService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct AdvisoryRow {
    id: Uuid,
    title: String,
    content: String,
    severity: String,
    date_posted: DateTime<Utc>,
}

impl TryFrom<AdvisoryRow> for Advisory {
    type Error = AppError;

    fn try_from(row: AdvisoryRow) -> Result<Self, Self::Error> {
        let severity = row
            .severity
            .parse::<Severity>()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Advisory {
            id: Some(row.id),
            title: row.title,
            content: row.content,
            severity,
            date_posted: row.date_posted,
            origin: AdvisoryOrigin::Persisted,
        })
    }
}

/// Input for publishing an advisory
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdvisoryInput {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[serde(default)]
    pub severity: Severity,
}

impl AdvisoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Persisted advisories, newest first
    pub async fn list(&self, limit: Option<i64>) -> AppResult<Vec<Advisory>> {
        let rows = sqlx::query_as::<_, AdvisoryRow>(
            r#"
            SELECT id, title, content, severity, date_posted
            FROM advisories
            ORDER BY date_posted DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Advisory::try_from).collect()
    }

    pub async fn create(&self, input: CreateAdvisoryInput) -> AppResult<Advisory> {
        input.validate()?;

        let row = sqlx::query_as::<_, AdvisoryRow>(
            r#"
            INSERT INTO advisories (title, content, severity)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, severity, date_posted
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.severity.as_str())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(advisory_id = %row.id, severity = %row.severity, "Advisory published");
        row.try_into()
    }

    pub async fn delete(&self, advisory_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM advisories WHERE id = $1")
            .bind(advisory_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Advisory".to_string()));
        }
        Ok(())
    }
}

//! Admin moderation and analytics service

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::{CropService, ReportService};
use crate::models::{Crop, Pagination, PollutionReport, Role, User};

/// Number of recent crops and reports on the overview
pub const RECENT_ACTIVITY_LIMIT: i64 = 10;

/// Admin service
#[derive(Clone)]
pub struct AdminService {
    db: PgPool,
}

/// Platform-wide analytics
#[derive(Debug, Serialize)]
pub struct AdminOverview {
    pub total_users: i64,
    pub total_farmers: i64,
    pub total_admins: i64,
    pub total_crops: i64,
    pub total_reports: i64,
    pub pending_reports: i64,
    pub recent_crops: Vec<Crop>,
    pub recent_reports: Vec<PollutionReport>,
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    role: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            role: Role::resolve(row.role.as_deref()),
            created_at: row.created_at,
        }
    }
}

impl AdminService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn overview(&self) -> AppResult<AdminOverview> {
        // Users without a profile count as farmers
        let (total_users, total_admins) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE p.role = 'ADMIN')
            FROM users u
            LEFT JOIN user_profiles p ON p.user_id = u.id
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let crops = CropService::new(self.db.clone());
        let reports = ReportService::new(self.db.clone());
        let (total_reports, pending_reports) = reports.counts().await?;

        Ok(AdminOverview {
            total_users,
            total_farmers: total_users - total_admins,
            total_admins,
            total_crops: crops.count().await?,
            total_reports,
            pending_reports,
            recent_crops: crops.list_recent(RECENT_ACTIVITY_LIMIT).await?,
            recent_reports: reports.list_all(Some(RECENT_ACTIVITY_LIMIT)).await?,
        })
    }

    /// Accounts with their resolved roles, newest first
    pub async fn list_users(&self, pagination: &Pagination) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.username, u.email, p.role, u.created_at
            FROM users u
            LEFT JOIN user_profiles p ON p.user_id = u.id
            ORDER BY u.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Delete an account; admins cannot delete themselves
    pub async fn delete_user(&self, acting_user: Uuid, acting_role: Role, target: Uuid) -> AppResult<()> {
        shared::validate_user_deletion(acting_user, acting_role, target).map_err(|msg| {
            if acting_role.is_admin() {
                AppError::ValidationError(msg.to_string())
            } else {
                AppError::InsufficientPermissions
            }
        })?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(target)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        tracing::info!(%acting_user, deleted_user = %target, "User deleted by admin");
        Ok(())
    }
}

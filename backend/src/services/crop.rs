//! Crop service for logging and tracking a user's crops

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Crop, CropProfile};

/// Crop service
#[derive(Clone)]
pub struct CropService {
    db: PgPool,
}

/// Crop record as stored
#[derive(Debug, Clone, FromRow)]
pub struct CropRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub optimal_temp_min: f64,
    pub optimal_temp_max: f64,
    pub water_requirement: String,
    pub soil_type: String,
    pub fertilizers: String,
    pub manures: String,
    pub pesticides: String,
    pub image_url: Option<String>,
    pub planted_date: Option<NaiveDate>,
    pub harvested_date: Option<NaiveDate>,
    pub is_tracked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CropRow> for Crop {
    fn from(row: CropRow) -> Self {
        Crop {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            profile: CropProfile {
                description: row.description,
                optimal_temp_min: row.optimal_temp_min,
                optimal_temp_max: row.optimal_temp_max,
                water_requirement: row.water_requirement,
                soil_type: row.soil_type,
                fertilizers: row.fertilizers,
                manures: row.manures,
                pesticides: row.pesticides,
            },
            image_url: row.image_url,
            planted_date: row.planted_date,
            harvested_date: row.harvested_date,
            is_tracked: row.is_tracked,
            created_at: row.created_at,
        }
    }
}

/// Input for logging a crop. The agronomic profile is resolved, not supplied.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCropInput {
    #[validate(length(min = 1, max = 100, message = "Crop name must be 1-100 characters"))]
    pub name: String,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    pub planted_date: Option<NaiveDate>,
    pub harvested_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_tracked: bool,
}

impl CreateCropInput {
    /// Field rules plus a non-blank name once trimmed
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        shared::validate_crop_name(&self.name).map_err(|msg| AppError::validation("name", msg))
    }
}

/// Manual edits to a crop; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCropInput {
    pub optimal_temp_min: Option<f64>,
    pub optimal_temp_max: Option<f64>,
    pub water_requirement: Option<String>,
    pub planted_date: Option<NaiveDate>,
    pub harvested_date: Option<NaiveDate>,
    pub is_tracked: Option<bool>,
}

impl UpdateCropInput {
    /// Apply the edits to a crop, rejecting an inverted temperature range
    pub fn apply(self, crop: &mut Crop) -> AppResult<()> {
        let min = self.optimal_temp_min.unwrap_or(crop.profile.optimal_temp_min);
        let max = self.optimal_temp_max.unwrap_or(crop.profile.optimal_temp_max);
        shared::validate_temperature_range(min, max)
            .map_err(|msg| AppError::validation("optimal_temp_min", msg))?;

        crop.profile.optimal_temp_min = min;
        crop.profile.optimal_temp_max = max;
        if let Some(water) = self.water_requirement {
            crop.profile.water_requirement = water;
        }
        if self.planted_date.is_some() {
            crop.planted_date = self.planted_date;
        }
        if self.harvested_date.is_some() {
            crop.harvested_date = self.harvested_date;
        }
        if let Some(is_tracked) = self.is_tracked {
            crop.is_tracked = is_tracked;
        }
        Ok(())
    }
}

const CROP_COLUMNS: &str = r#"
    id, user_id, name, description, optimal_temp_min, optimal_temp_max,
    water_requirement, soil_type, fertilizers, manures, pesticides,
    image_url, planted_date, harvested_date, is_tracked, created_at
"#;

impl CropService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Insert a crop with a resolved profile
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateCropInput,
        profile: CropProfile,
    ) -> AppResult<Crop> {
        let row = sqlx::query_as::<_, CropRow>(&format!(
            r#"
            INSERT INTO crops (
                user_id, name, description, optimal_temp_min, optimal_temp_max,
                water_requirement, soil_type, fertilizers, manures, pesticides,
                image_url, planted_date, harvested_date, is_tracked
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            CROP_COLUMNS
        ))
        .bind(user_id)
        .bind(input.name.trim())
        .bind(&profile.description)
        .bind(profile.optimal_temp_min)
        .bind(profile.optimal_temp_max)
        .bind(&profile.water_requirement)
        .bind(&profile.soil_type)
        .bind(&profile.fertilizers)
        .bind(&profile.manures)
        .bind(&profile.pesticides)
        .bind(&input.image_url)
        .bind(input.planted_date)
        .bind(input.harvested_date)
        .bind(input.is_tracked)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(crop_id = %row.id, name = %row.name, "Crop created");
        Ok(row.into())
    }

    /// A user's crops, newest first, optionally filtered by a name fragment
    pub async fn list_for_user(&self, user_id: Uuid, query: Option<&str>) -> AppResult<Vec<Crop>> {
        let pattern = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q));

        let rows = sqlx::query_as::<_, CropRow>(&format!(
            r#"
            SELECT {}
            FROM crops
            WHERE user_id = $1 AND ($2::TEXT IS NULL OR name ILIKE $2)
            ORDER BY created_at DESC
            "#,
            CROP_COLUMNS
        ))
        .bind(user_id)
        .bind(pattern)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// A user's tracked crops
    pub async fn list_tracked(&self, user_id: Uuid) -> AppResult<Vec<Crop>> {
        let rows = sqlx::query_as::<_, CropRow>(&format!(
            r#"
            SELECT {}
            FROM crops
            WHERE user_id = $1 AND is_tracked = TRUE
            ORDER BY created_at DESC
            "#,
            CROP_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Most recently logged crops across all users
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<Crop>> {
        let rows = sqlx::query_as::<_, CropRow>(&format!(
            "SELECT {} FROM crops ORDER BY created_at DESC LIMIT $1",
            CROP_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fetch a crop owned by the user
    pub async fn get(&self, user_id: Uuid, crop_id: Uuid) -> AppResult<Crop> {
        let row = sqlx::query_as::<_, CropRow>(&format!(
            "SELECT {} FROM crops WHERE id = $1 AND user_id = $2",
            CROP_COLUMNS
        ))
        .bind(crop_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Crop".to_string()))?;

        Ok(row.into())
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        crop_id: Uuid,
        input: UpdateCropInput,
    ) -> AppResult<Crop> {
        let mut crop = self.get(user_id, crop_id).await?;
        input.apply(&mut crop)?;

        let row = sqlx::query_as::<_, CropRow>(&format!(
            r#"
            UPDATE crops
            SET optimal_temp_min = $3,
                optimal_temp_max = $4,
                water_requirement = $5,
                planted_date = $6,
                harvested_date = $7,
                is_tracked = $8
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            CROP_COLUMNS
        ))
        .bind(crop_id)
        .bind(user_id)
        .bind(crop.profile.optimal_temp_min)
        .bind(crop.profile.optimal_temp_max)
        .bind(&crop.profile.water_requirement)
        .bind(crop.planted_date)
        .bind(crop.harvested_date)
        .bind(crop.is_tracked)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Crop".to_string()))?;

        Ok(row.into())
    }

    pub async fn delete(&self, user_id: Uuid, crop_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM crops WHERE id = $1 AND user_id = $2")
            .bind(crop_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Crop".to_string()));
        }
        Ok(())
    }

    /// Remove crops with no owner, or every crop when `include_owned`; returns rows deleted
    pub async fn purge(&self, include_owned: bool) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM crops WHERE $1 OR user_id IS NULL")
            .bind(include_owned)
            .execute(&self.db)
            .await?;

        tracing::info!(deleted = result.rows_affected(), include_owned, "Crops purged");
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM crops")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tomato() -> Crop {
        Crop {
            id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            name: "Tomato".to_string(),
            profile: shared::resolve_local_profile("Tomato", None),
            image_url: None,
            planted_date: None,
            harvested_date: None,
            is_tracked: false,
            created_at: Utc::now(),
        }
    }

    fn crop_input(name: &str) -> CreateCropInput {
        CreateCropInput {
            name: name.to_string(),
            image_url: None,
            planted_date: None,
            harvested_date: None,
            is_tracked: false,
        }
    }

    #[test]
    fn test_blank_crop_name_rejected() {
        for name in ["", "   "] {
            assert!(matches!(
                crop_input(name).check(),
                Err(AppError::Validation { ref field, .. }) if field == "name"
            ));
        }
        assert!(crop_input(" Wheat ").check().is_ok());
    }

    #[test]
    fn test_update_applies_partial_range() {
        let mut crop = tomato();
        let input = UpdateCropInput {
            optimal_temp_max: Some(32.0),
            is_tracked: Some(true),
            ..Default::default()
        };
        input.apply(&mut crop).unwrap();
        assert_eq!(crop.profile.optimal_temp_min, 18.0);
        assert_eq!(crop.profile.optimal_temp_max, 32.0);
        assert!(crop.is_tracked);
    }

    #[test]
    fn test_update_rejects_inverted_range() {
        let mut crop = tomato();
        let input = UpdateCropInput {
            optimal_temp_min: Some(35.0),
            ..Default::default()
        };
        assert!(matches!(
            input.apply(&mut crop),
            Err(AppError::Validation { .. })
        ));
        assert_eq!(crop.profile.optimal_temp_min, 18.0);
    }
}

//! Per-user location context persistence

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{GpsCoordinates, LocationContext};

#[derive(Clone)]
pub struct LocationService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct LocationRow {
    latitude: f64,
    longitude: f64,
    city: String,
}

impl From<LocationRow> for LocationContext {
    fn from(row: LocationRow) -> Self {
        LocationContext {
            coordinates: GpsCoordinates::new(row.latitude, row.longitude),
            city: row.city,
        }
    }
}

impl LocationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// The user's last successfully geocoded location, if any
    pub async fn load(&self, user_id: Uuid) -> AppResult<Option<LocationContext>> {
        let row = sqlx::query_as::<_, LocationRow>(
            "SELECT latitude, longitude, city FROM location_contexts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Stored context, or `default` when the user has none
    pub async fn load_or(&self, user_id: Uuid, default: LocationContext) -> AppResult<LocationContext> {
        Ok(self.load(user_id).await?.unwrap_or(default))
    }

    pub async fn save(&self, user_id: Uuid, context: &LocationContext) -> AppResult<()> {
        shared::validate_coordinates(context.coordinates.latitude, context.coordinates.longitude)
            .map_err(|msg| AppError::validation("coordinates", msg))?;

        sqlx::query(
            r#"
            INSERT INTO location_contexts (user_id, latitude, longitude, city, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                city = EXCLUDED.city,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(context.coordinates.latitude)
        .bind(context.coordinates.longitude)
        .bind(&context.city)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

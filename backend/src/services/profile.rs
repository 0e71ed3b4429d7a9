//! User profile (role) service

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Role;

/// Profile service
#[derive(Clone)]
pub struct ProfileService {
    db: PgPool,
}

impl ProfileService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create the FARMER profile if missing and return the stored role
    pub async fn ensure_profile(&self, user_id: Uuid) -> AppResult<Role> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, role)
            VALUES ($1, 'FARMER')
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .execute(&self.db)
        .await?;

        self.resolve_role(user_id).await
    }

    /// Read the role without writing; a missing profile reads as FARMER
    pub async fn resolve_role(&self, user_id: Uuid) -> AppResult<Role> {
        let stored = sqlx::query_scalar::<_, String>(
            "SELECT role FROM user_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(Role::resolve(stored.as_deref()))
    }

    /// Upsert a role
    pub async fn set_role(&self, user_id: Uuid, role: Role) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, role)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role
            "#,
        )
        .bind(user_id)
        .bind(role.as_str())
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Give every account without a profile a FARMER one; returns rows created
    pub async fn backfill_missing(&self) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, role)
            SELECT u.id, 'FARMER'
            FROM users u
            LEFT JOIN user_profiles p ON p.user_id = u.id
            WHERE p.user_id IS NULL
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected())
    }
}

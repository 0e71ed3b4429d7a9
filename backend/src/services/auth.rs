//! Authentication service for user registration, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::ProfileService;
use crate::models::Role;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Input for registering a new account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 3, max = 150, message = "Username must be 3-150 characters"))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issued access token
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub user_id: Uuid,
    pub role: Role,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    username: String,
    password_hash: String,
}

impl AuthService {
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Create an account with a FARMER profile and sign it in
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthTokens> {
        input.validate()?;
        shared::validate_username(&input.username)
            .map_err(|msg| AppError::validation("username", msg))?;
        shared::validate_password(&input.password)
            .map_err(|msg| AppError::validation("password", msg))?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE username = $1",
        )
        .bind(&input.username)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("username".to_string()));
        }

        let user_id = create_user(&self.db, &input.username, &input.email, &input.password).await?;
        let role = ProfileService::new(self.db.clone()).ensure_profile(user_id).await?;

        tracing::info!(%user_id, username = %input.username, "Registered new account");

        self.issue_tokens(user_id, &input.username, role)
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AuthTokens> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(password, &row.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let role = ProfileService::new(self.db.clone()).ensure_profile(row.id).await?;
        self.issue_tokens(row.id, &row.username, role)
    }

    fn issue_tokens(&self, user_id: Uuid, username: &str, role: Role) -> AppResult<AuthTokens> {
        let access_token = self.create_token(user_id, username)?;
        Ok(AuthTokens {
            user_id,
            role,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    fn create_token(&self, user_id: Uuid, username: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token creation failed: {}", e)))
    }
}

/// Insert an account row with a bcrypt-hashed password
pub async fn create_user(
    db: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> AppResult<Uuid> {
    let password_hash = hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

    let user_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (username, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(&password_hash)
    .fetch_one(db)
    .await?;

    Ok(user_id)
}

/// Decode and validate a JWT
pub fn decode_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_for(secret: &str, exp_offset: i64) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "farmer_01".to_string(),
            exp: (now + Duration::seconds(exp_offset)).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_valid_token() {
        let token = token_for("secret", 3600);
        let claims = decode_token(&token, "secret").unwrap();
        assert_eq!(claims.username, "farmer_01");
    }

    #[test]
    fn test_decode_rejects_wrong_secret_and_expiry() {
        let token = token_for("secret", 3600);
        assert!(matches!(decode_token(&token, "other"), Err(AppError::InvalidToken)));

        let expired = token_for("secret", -3600);
        assert!(matches!(decode_token(&expired, "secret"), Err(AppError::TokenExpired)));

        assert!(matches!(decode_token("not-a-jwt", "secret"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_register_input_validation() {
        let input = RegisterInput {
            username: "ab".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}

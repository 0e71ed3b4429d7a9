//! Validation utilities for the AgriAir platform

use crate::models::Role;

// ============================================================================
// Agronomy Validations
// ============================================================================

/// Validate an optimal temperature range (min must not exceed max)
pub fn validate_temperature_range(min: f64, max: f64) -> Result<(), &'static str> {
    if !min.is_finite() || !max.is_finite() {
        return Err("Temperatures must be finite numbers");
    }
    if min > max {
        return Err("Minimum optimal temperature cannot exceed the maximum");
    }
    if min < -50.0 || max > 60.0 {
        return Err("Optimal temperatures must be between -50 and 60°C");
    }
    Ok(())
}

/// Validate a crop name is usable for knowledge lookup
pub fn validate_crop_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Crop name is required");
    }
    if trimmed.chars().count() > 100 {
        return Err("Crop name must be at most 100 characters");
    }
    Ok(())
}

/// Validate geographic coordinates
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate username format (letters, digits and @/./+/-/_ only)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 150 {
        return Err("Username must be at most 150 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err("Username may contain only letters, digits and @/./+/-/_");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err("Password cannot be entirely numeric");
    }
    Ok(())
}

// ============================================================================
// Moderation Validations
// ============================================================================

/// An admin may delete any account except their own
pub fn validate_user_deletion(
    acting_user: uuid::Uuid,
    acting_role: Role,
    target_user: uuid::Uuid,
) -> Result<(), &'static str> {
    if !acting_role.is_admin() {
        return Err("Admin privileges required");
    }
    if acting_user == target_user {
        return Err("You cannot delete your own account");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_temperature_range() {
        assert!(validate_temperature_range(10.0, 25.0).is_ok());
        assert!(validate_temperature_range(20.0, 20.0).is_ok());
        assert!(validate_temperature_range(30.0, 20.0).is_err());
        assert!(validate_temperature_range(f64::NAN, 20.0).is_err());
        assert!(validate_temperature_range(-80.0, 20.0).is_err());
    }

    #[test]
    fn test_crop_name() {
        assert!(validate_crop_name("Wheat").is_ok());
        assert!(validate_crop_name("   ").is_err());
        assert!(validate_crop_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_coordinates() {
        assert!(validate_coordinates(30.9010, 75.8573).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn test_username() {
        assert!(validate_username("farmer_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_password() {
        assert!(validate_password("monsoon2024").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("12345678").is_err());
    }

    #[test]
    fn test_self_deletion_rejected() {
        let admin = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(validate_user_deletion(admin, Role::Admin, other).is_ok());
        assert_eq!(
            validate_user_deletion(admin, Role::Admin, admin),
            Err("You cannot delete your own account")
        );
        assert!(validate_user_deletion(admin, Role::Farmer, other).is_err());
    }
}

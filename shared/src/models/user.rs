//! User and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Platform role attached 1:1 to an account through its profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Farmer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "FARMER",
            Role::Admin => "ADMIN",
        }
    }

    /// Resolve a stored role value. Total: anything other than "ADMIN",
    /// including a missing profile, is a farmer.
    pub fn resolve(stored: Option<&str>) -> Role {
        match stored {
            Some("ADMIN") => Role::Admin,
            _ => Role::Farmer,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Farmer => write!(f, "Farmer"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_resolution_defaults_to_farmer() {
        assert_eq!(Role::resolve(Some("ADMIN")), Role::Admin);
        assert_eq!(Role::resolve(Some("FARMER")), Role::Farmer);
        assert_eq!(Role::resolve(Some("admin")), Role::Farmer);
        assert_eq!(Role::resolve(Some("")), Role::Farmer);
        assert_eq!(Role::resolve(None), Role::Farmer);
    }
}

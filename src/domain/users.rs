//! Admin user domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Admin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
        }
    }

    /// Permission claims carried in issued tokens
    pub fn permissions(&self) -> Vec<String> {
        match self {
            AdminRole::Admin => vec!["admin".to_string()],
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(AdminRole::Admin),
            _ => Err(format!("unsupported admin role: {}", s)),
        }
    }
}

/// A backoffice account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    /// Hex-encoded SHA-256 of salt || password
    pub password_digest: String,
    /// Hex-encoded random salt
    pub salt: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

//! Admin authentication service

use crate::config::AppConfig;
use crate::domain::users::{AdminRole, AdminUser};
use crate::infrastructure::adapters::{TokenIssuerAdapter, UsersRepository};
use crate::infrastructure::adapters::token_issuer::TokenIssuanceResponse;
use crate::shared::error::{AppError, AppResult};
use chrono::Utc;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Hash a password with its salt (hex-encoded SHA-256 of salt || password)
pub fn hash_password(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Generate a random hex salt
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub struct AuthService {
    users: Arc<UsersRepository>,
    issuer: Arc<TokenIssuerAdapter>,
}

impl AuthService {
    pub fn new(users: Arc<UsersRepository>, issuer: Arc<TokenIssuerAdapter>) -> Self {
        Self { users, issuer }
    }

    /// Authenticate an admin and issue a bearer token
    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenIssuanceResponse> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let user = match self.users.find_by_username(&request.username).await? {
            Some(user) => user,
            None => {
                warn!(username = %request.username, "Login attempt for unknown user");
                return Err(AppError::Authentication("invalid credentials".into()));
            }
        };

        let computed = hash_password(&user.salt, &request.password);
        if !constant_time_eq::constant_time_eq(
            computed.as_bytes(),
            user.password_digest.as_bytes(),
        ) {
            warn!(username = %request.username, "Login attempt with wrong password");
            return Err(AppError::Authentication("invalid credentials".into()));
        }

        self.issuer.issue_admin_token(&user)
    }

    /// Insert the configured bootstrap admin when the users table is empty
    pub async fn bootstrap_admin(&self, config: &AppConfig) -> AppResult<()> {
        if self.users.count().await? > 0 {
            return Ok(());
        }

        let salt = generate_salt();
        let user = AdminUser {
            id: Uuid::new_v4().to_string(),
            username: config.security.bootstrap_admin.username.clone(),
            password_digest: hash_password(&salt, &config.security.bootstrap_admin.password),
            salt,
            role: AdminRole::Admin,
            created_at: Utc::now(),
        };
        self.users.insert(&user).await?;

        info!(username = %user.username, "Bootstrap admin account created");
        Ok(())
    }
}

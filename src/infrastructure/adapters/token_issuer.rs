//! Token issuer adapter for JWT token generation and validation
//!
//! This adapter handles JWT issuance for the admin backoffice.

use crate::config::AppConfig;
use crate::domain::users::AdminUser;
use crate::shared::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at
    pub iat: usize,

    /// Expiration time
    pub exp: usize,

    /// Not before
    pub nbf: usize,

    /// JWT ID (unique identifier)
    pub jti: String,

    /// User permissions
    pub permissions: Vec<String>,
}

/// Response for token issuance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenIssuanceResponse {
    /// JWT token
    pub token: String,

    /// Token type
    pub token_type: String,

    /// Expiration time in seconds
    pub expires_in: u64,

    /// Token ID
    pub token_id: String,
}

/// Adapter for token issuance
pub struct TokenIssuerAdapter {
    config: Arc<AppConfig>,
}

impl TokenIssuerAdapter {
    /// Create a new token issuer adapter
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Issue a JWT token for an authenticated admin user
    pub fn issue_admin_token(&self, user: &AdminUser) -> AppResult<TokenIssuanceResponse> {
        let token_id = Uuid::new_v4().to_string();
        let expiration_seconds = self.config.security.jwt.expiration_seconds;
        let now = Utc::now();
        let expiration = now + Duration::seconds(expiration_seconds as i64);

        let claims = JwtClaims {
            sub: user.id.clone(),
            iss: self.config.security.jwt.issuer.clone(),
            aud: self.config.security.jwt.audience.clone(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
            nbf: now.timestamp() as usize,
            jti: token_id.clone(),
            permissions: user.role.permissions(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.security.jwt.secret_key.as_ref()),
        )
        .map_err(|e| {
            error!("JWT encoding failed: {}", e);
            AppError::Internal(format!("Token generation failed: {}", e))
        })?;

        info!("JWT token issued for user: {}", user.username);

        Ok(TokenIssuanceResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: expiration_seconds,
            token_id,
        })
    }

    /// Decode and validate a JWT token, returning its claims
    pub fn decode_token(&self, token: &str) -> AppResult<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.security.jwt.audience]);
        validation.set_issuer(&[&self.config.security.jwt.issuer]);

        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.config.security.jwt.secret_key.as_ref()),
            &validation,
        )
        .map_err(|e| AppError::Authentication(format!("JWT validation failed: {}", e)))?;

        Ok(token_data.claims)
    }
}

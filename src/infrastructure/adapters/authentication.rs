//! Authentication adapter for token validation
//!
//! This adapter handles JWT token validation and permission checks for the
//! admin backoffice routes.

use crate::config::AppConfig;
use crate::infrastructure::adapters::token_issuer::TokenIssuerAdapter;
use crate::shared::error::{AppError, AppResult};
use std::sync::Arc;
use tracing::warn;

/// Validated caller identity
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub permissions: Vec<String>,
}

impl AuthContext {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Adapter for authentication services
pub struct AuthenticationAdapter {
    issuer: TokenIssuerAdapter,
}

impl AuthenticationAdapter {
    /// Create a new authentication adapter
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            issuer: TokenIssuerAdapter::new(config),
        }
    }

    /// Validate an Authorization header value ("Bearer <jwt>")
    pub fn validate_bearer(&self, auth_header: &str) -> AppResult<AuthContext> {
        if auth_header.is_empty() {
            return Err(AppError::Authentication("Empty token".to_string()));
        }

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid token format".to_string()))?
            .trim();

        if token.len() < 10 {
            return Err(AppError::Authentication("Token too short".to_string()));
        }

        let claims = self.issuer.decode_token(token)?;
        Ok(AuthContext {
            user_id: claims.sub,
            permissions: claims.permissions,
        })
    }

    /// Validate a bearer header and require a permission
    pub fn require_permission(&self, auth_header: &str, permission: &str) -> AppResult<AuthContext> {
        let context = self.validate_bearer(auth_header)?;
        if !context.has_permission(permission) {
            warn!(
                user_id = %context.user_id,
                permission = %permission,
                "Permission denied"
            );
            return Err(AppError::Security(format!(
                "{} permission required",
                permission
            )));
        }
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::{AdminRole, AdminUser};
    use chrono::Utc;

    fn issue_token(config: &Arc<AppConfig>) -> String {
        let issuer = TokenIssuerAdapter::new(config.clone());
        let user = AdminUser {
            id: "u_1".into(),
            username: "admin".into(),
            password_digest: String::new(),
            salt: String::new(),
            role: AdminRole::Admin,
            created_at: Utc::now(),
        };
        issuer.issue_admin_token(&user).unwrap().token
    }

    #[test]
    fn test_bearer_validation() {
        let config = Arc::new(AppConfig::default());
        let auth = AuthenticationAdapter::new(config.clone());

        assert!(auth.validate_bearer("").is_err());
        assert!(auth.validate_bearer("invalid").is_err());
        assert!(auth.validate_bearer("Bearer short").is_err());

        let token = issue_token(&config);
        let context = auth.validate_bearer(&format!("Bearer {}", token)).unwrap();
        assert_eq!(context.user_id, "u_1");
    }

    #[test]
    fn test_permission_check() {
        let config = Arc::new(AppConfig::default());
        let auth = AuthenticationAdapter::new(config.clone());
        let token = issue_token(&config);
        let header = format!("Bearer {}", token);

        assert!(auth.require_permission(&header, "admin").is_ok());
        let err = auth.require_permission(&header, "superuser").unwrap_err();
        assert!(matches!(err, AppError::Security(_)));
    }
}

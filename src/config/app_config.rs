//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use validator::Validate;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Maximum request size in bytes
    #[validate(range(min = 1024, max = 10485760))] // 1KB to 10MB
    pub max_request_size: usize,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    #[validate(length(min = 1))]
    pub url: String,

    /// Maximum pool connections
    #[validate(range(min = 1, max = 64))]
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JwtConfig {
    /// JWT secret key
    #[validate(length(min = 32))]
    pub secret_key: String,

    /// JWT token expiration time in seconds
    #[validate(range(min = 60, max = 86400))] // 1 minute to 24 hours
    pub expiration_seconds: u64,

    /// JWT issuer
    #[validate(length(min = 1))]
    pub issuer: String,

    /// JWT audience
    #[validate(length(min = 1))]
    pub audience: String,
}

/// Bootstrap admin account, inserted only when the users table is empty
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BootstrapAdminConfig {
    #[validate(length(min = 3, max = 64))]
    pub username: String,

    #[validate(length(min = 8))]
    pub password: String,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SecurityConfig {
    /// Enable request logging
    pub enable_request_logging: bool,

    /// Enable security headers on JSON responses
    pub enable_security_headers: bool,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Bootstrap admin credentials
    pub bootstrap_admin: BootstrapAdminConfig,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateLimitConfig {
    /// Requests per minute per IP
    #[validate(range(min = 1, max = 10000))]
    pub requests_per_minute: u32,

    /// Burst size
    #[validate(range(min = 1, max = 1000))]
    pub burst_size: u32,

    /// Enable rate limiting
    pub enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,
}

/// Payments configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentsConfig {
    /// Enable paid registrations
    pub enabled: bool,

    /// Gateway API base URL
    #[validate(url)]
    pub gateway_base_url: String,

    /// Gateway API key (sent as bearer token)
    #[validate(length(min = 1))]
    pub gateway_api_key: String,

    /// Shared secret for webhook HMAC signatures
    #[validate(length(min = 16))]
    pub webhook_secret: String,

    /// Invoice validity in minutes
    #[validate(range(min = 5, max = 10080))]
    pub invoice_ttl_minutes: u32,

    /// ISO currency code used for invoices
    #[validate(length(min = 3, max = 3))]
    pub currency: String,

    /// Gateway request timeout in seconds
    #[validate(range(min = 1, max = 120))]
    pub timeout_seconds: u64,

    /// Maximum retry attempts for gateway calls
    #[validate(range(min = 0, max = 10))]
    pub max_retries: u32,
}

/// Email configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailConfig {
    /// Enable outbound email (disabled mode logs instead of sending)
    pub enabled: bool,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port
    #[validate(range(min = 1, max = 65535))]
    pub smtp_port: u16,

    /// SMTP username
    pub smtp_username: String,

    /// SMTP password
    pub smtp_password: String,

    /// Sender address
    pub from_email: String,

    /// Sender display name
    pub from_name: String,

    /// Public base URL used in email links (checkout, registration lookup)
    #[validate(url)]
    pub public_base_url: String,
}

/// Attendance configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttendanceConfig {
    /// Length of generated check-in tokens
    #[validate(range(min = 6, max = 64))]
    pub token_length: usize,

    /// Default token validity in minutes
    #[validate(range(min = 1, max = 1440))]
    pub default_ttl_minutes: u32,

    /// Sweep interval for expired tokens in seconds
    #[validate(range(min = 5, max = 3600))]
    pub sweep_interval_seconds: u64,
}

/// Content listing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContentConfig {
    /// Default page size for listings
    #[validate(range(min = 1, max = 100))]
    pub default_page_size: u32,

    /// Maximum page size for listings
    #[validate(range(min = 1, max = 500))]
    pub max_page_size: u32,
}

/// Application configuration. Sections missing from the file/environment
/// fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Security configuration
    pub security: SecurityConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Payments configuration
    pub payments: PaymentsConfig,

    /// Email configuration
    pub email: EmailConfig,

    /// Attendance configuration
    pub attendance: AttendanceConfig,

    /// Content listing configuration
    pub content: ContentConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1".parse().expect("valid default bind address"),
                port: 8080,
                max_request_size: 1024 * 1024, // 1MB
            },
            database: DatabaseConfig {
                url: "sqlite://eventpass.db?mode=rwc".to_string(),
                max_connections: 8,
            },
            security: SecurityConfig {
                enable_request_logging: true,
                enable_security_headers: true,
                jwt: JwtConfig {
                    secret_key: "change-me-to-a-real-secret-of-32-chars-min".to_string(),
                    expiration_seconds: 3600, // 1 hour
                    issuer: "eventpass-server".to_string(),
                    audience: "eventpass-admin".to_string(),
                },
                bootstrap_admin: BootstrapAdminConfig {
                    username: "admin".to_string(),
                    password: "change-me-please".to_string(),
                },
            },
            rate_limit: RateLimitConfig {
                requests_per_minute: 600,
                burst_size: 60,
                enabled: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            payments: PaymentsConfig {
                enabled: true,
                gateway_base_url: "https://api.gateway.example.com".to_string(),
                gateway_api_key: "your-gateway-api-key".to_string(),
                webhook_secret: "your-webhook-callback-secret".to_string(),
                invoice_ttl_minutes: 60 * 24,
                currency: "USD".to_string(),
                timeout_seconds: 30,
                max_retries: 3,
            },
            email: EmailConfig {
                enabled: false,
                smtp_host: "smtp.example.com".to_string(),
                smtp_port: 587,
                smtp_username: String::new(),
                smtp_password: String::new(),
                from_email: "noreply@example.com".to_string(),
                from_name: "EventPass".to_string(),
                public_base_url: "https://events.example.com".to_string(),
            },
            attendance: AttendanceConfig {
                token_length: 8,
                default_ttl_minutes: 120,
                sweep_interval_seconds: 60,
            },
            content: ContentConfig {
                default_page_size: 20,
                max_page_size: 100,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("Conf").required(false))
            .add_source(config::Environment::with_prefix("EVENTPASS").separator("__"))
            .build()
            .map_err(|e| {
                crate::shared::error::AppError::Config(format!("Failed to build configuration: {}", e))
            })?;

        let config: AppConfig = config.try_deserialize().map_err(|e| {
            crate::shared::error::AppError::Config(format!(
                "Failed to deserialize configuration: {}",
                e
            ))
        })?;

        config.validate_config().map_err(|e| {
            crate::shared::error::AppError::Validation(format!(
                "Configuration validation failed: {}",
                e
            ))
        })?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> Result<(), validator::ValidationErrors> {
        self.server.validate()?;
        self.database.validate()?;
        self.security.validate()?;
        self.security.jwt.validate()?;
        self.security.bootstrap_admin.validate()?;
        self.rate_limit.validate()?;
        self.logging.validate()?;
        self.payments.validate()?;
        self.email.validate()?;
        self.attendance.validate()?;
        self.content.validate()?;

        Ok(())
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate_config().is_ok());
        assert_eq!(config.server_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_validation_rejects_short_jwt_secret() {
        let mut config = AppConfig::default();
        config.security.jwt.secret_key = "short".to_string();
        assert!(config.validate_config().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_page_size() {
        let mut config = AppConfig::default();
        config.content.default_page_size = 0;
        assert!(config.validate_config().is_err());
    }
}

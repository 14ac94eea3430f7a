//! HTTP handlers
//!
//! Handlers are free functions: rate-limit the client, call the service,
//! and render a JSON reply with the configured security headers.

pub mod attendance;
pub mod auth;
pub mod certificates;
pub mod content;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod metrics;
pub mod payments;
pub mod registrations;

use crate::application::services::MetricsService;
use crate::config::AppConfig;
use crate::infrastructure::http::models::RequestContext;
use crate::middleware::{
    create_json_response_with_security_headers, RateLimitMiddleware, SecurityHeadersMiddleware,
};
use crate::shared::error::{AppError, AppResult};
use crate::shared::logging::LoggingUtils;
use serde::Serialize;
use std::sync::Arc;
use warp::http::StatusCode;

pub use attendance::*;
pub use auth::*;
pub use certificates::*;
pub use content::*;
pub use dashboard::*;
pub use events::*;
pub use health::*;
pub use metrics::*;
pub use payments::*;
pub use registrations::*;

/// Cross-cutting dependencies shared by every handler
#[derive(Clone)]
pub struct RequestPipeline {
    pub config: AppConfig,
    pub rate_limiter: Arc<RateLimitMiddleware>,
    pub metrics: Arc<MetricsService>,
}

impl RequestPipeline {
    pub fn new(
        config: AppConfig,
        rate_limiter: Arc<RateLimitMiddleware>,
        metrics: Arc<MetricsService>,
    ) -> Self {
        Self {
            config,
            rate_limiter,
            metrics,
        }
    }

    /// Build the request context and apply the per-client rate limit.
    /// A limited client gets the final 429 response back immediately.
    pub fn begin(
        &self,
        client_ip: &str,
        endpoint: &str,
    ) -> Result<RequestContext, warp::reply::Response> {
        let context = self.begin_unlimited(client_ip, endpoint);
        if let Err(e) = self.rate_limiter.check(client_ip) {
            self.metrics.record_request(endpoint, "rate_limited");
            return Err(self.error_response(&context, &e));
        }
        Ok(context)
    }

    /// Context and logging without rate limiting (webhook deliveries)
    pub fn begin_unlimited(&self, client_ip: &str, endpoint: &str) -> RequestContext {
        let context = RequestContext::new(client_ip.to_string(), endpoint.to_string());
        if self.config.security.enable_request_logging {
            LoggingUtils::log_request(&context.request_id, endpoint, client_ip);
        }
        context
    }

    /// Render a service result as the final JSON response
    pub fn finish<T: Serialize>(
        &self,
        context: &RequestContext,
        result: AppResult<T>,
        ok_status: StatusCode,
    ) -> warp::reply::Response {
        match result {
            Ok(body) => {
                self.metrics.record_request(&context.endpoint, "ok");
                let middleware = SecurityHeadersMiddleware::new(&self.config);
                create_json_response_with_security_headers(&body, ok_status, &middleware)
            }
            Err(e) => {
                self.metrics.record_request(&context.endpoint, "error");
                self.error_response(context, &e)
            }
        }
    }

    fn error_response(&self, context: &RequestContext, error: &AppError) -> warp::reply::Response {
        let elapsed_ms = (chrono::Utc::now() - context.timestamp)
            .num_milliseconds()
            .max(0) as u64;
        LoggingUtils::log_error(&context.request_id, &context.endpoint, error, elapsed_ms);

        let middleware = SecurityHeadersMiddleware::new(&self.config);
        create_json_response_with_security_headers(
            &serde_json::json!({ "error": error.public_message() }),
            error.http_status_code(),
            &middleware,
        )
    }
}

//! Per-client rate limiting middleware

use crate::config::AppConfig;
use crate::shared::error::{AppError, AppResult};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;

/// Keyed per-IP limiter, shared across all routes. One limiter per process;
/// keys are client addresses.
pub struct RateLimitMiddleware {
    limiter: Option<DefaultKeyedRateLimiter<String>>,
}

impl RateLimitMiddleware {
    pub fn new(config: &AppConfig) -> Self {
        if !config.rate_limit.enabled {
            return Self { limiter: None };
        }

        let per_minute = NonZeroU32::new(config.rate_limit.requests_per_minute)
            .unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.rate_limit.burst_size).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_minute(per_minute).allow_burst(burst);

        Self {
            limiter: Some(RateLimiter::keyed(quota)),
        }
    }

    /// Check the limit for one client
    pub fn check(&self, client_ip: &str) -> AppResult<()> {
        if let Some(limiter) = &self.limiter {
            if limiter.check_key(&client_ip.to_string()).is_err() {
                crate::shared::logging::LoggingUtils::log_rate_limit(client_ip, "-");
                return Err(AppError::RateLimit);
            }
        }
        Ok(())
    }
}

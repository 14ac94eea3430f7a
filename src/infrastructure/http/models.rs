//! HTTP models - Infrastructure concerns
//!
//! Models specific to the HTTP surface: request tracking and pagination.

use crate::config::app_config::ContentConfig;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// HTTP request context for tracking and logging
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID
    pub request_id: String,

    /// Client IP address
    pub client_ip: String,

    /// Logical endpoint name (e.g. "events.list")
    pub endpoint: String,

    /// Request timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl RequestContext {
    pub fn new(client_ip: String, endpoint: String) -> Self {
        Self {
            request_id: generate_request_id(),
            client_ip,
            endpoint,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Pagination query parameters (?page=2&per_page=50)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// Clamp to the configured bounds and convert to LIMIT/OFFSET
    pub fn limit_offset(&self, config: &ContentConfig) -> (u32, u32) {
        let per_page = self
            .per_page
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size);
        let page = self.page.unwrap_or(1).max(1);
        (per_page, (page - 1) * per_page)
    }
}

fn generate_request_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();

    format!("req_{:x}", now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_config() -> ContentConfig {
        ContentConfig {
            default_page_size: 20,
            max_page_size: 100,
        }
    }

    #[test]
    fn test_page_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.limit_offset(&content_config()), (20, 0));
    }

    #[test]
    fn test_page_clamping() {
        let query = PageQuery {
            page: Some(3),
            per_page: Some(1000),
        };
        assert_eq!(query.limit_offset(&content_config()), (100, 200));

        let query = PageQuery {
            page: Some(0),
            per_page: Some(0),
        };
        assert_eq!(query.limit_offset(&content_config()), (1, 0));
    }
}

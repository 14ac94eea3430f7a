//! Security headers for JSON responses

use crate::config::AppConfig;
use serde::Serialize;
use warp::http::header::{HeaderValue, CACHE_CONTROL, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use warp::http::StatusCode;
use warp::Reply;

/// Applies the standard response headers when enabled in configuration
pub struct SecurityHeadersMiddleware {
    enabled: bool,
}

impl SecurityHeadersMiddleware {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            enabled: config.security.enable_security_headers,
        }
    }

    /// Insert the headers into a response
    pub fn apply(&self, headers: &mut warp::http::HeaderMap) {
        if !self.enabled {
            return;
        }
        headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
        headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
}

/// Serialize a body to JSON and attach the security headers
pub fn create_json_response_with_security_headers<T: Serialize>(
    body: &T,
    status: StatusCode,
    middleware: &SecurityHeadersMiddleware,
) -> warp::reply::Response {
    let mut response = warp::reply::with_status(warp::reply::json(body), status).into_response();
    middleware.apply(response.headers_mut());
    response
}

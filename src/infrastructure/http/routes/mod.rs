//! HTTP routes
//!
//! Each resource contributes a route group; the builder composes them into
//! the final filter tree.

pub mod attendance;
pub mod auth;
pub mod builder;
pub mod certificates;
pub mod content;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod metrics;
pub mod payments;
pub mod registrations;

pub use builder::{AppContext, RouteBuilder};

use crate::infrastructure::adapters::{AuthContext, AuthenticationAdapter};
use crate::shared::error::AppError;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Reply};

/// Inject a cloneable value into a filter chain
pub(crate) fn with<T: Clone + Send>(
    value: T,
) -> impl Filter<Extract = (T,), Error = Infallible> + Clone {
    warp::any().map(move || value.clone())
}

/// Client address from the reverse proxy, falling back to loopback
pub(crate) fn client_ip() -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("x-forwarded-for").map(|forwarded: Option<String>| {
        forwarded
            .and_then(|value| value.split(',').next().map(|ip| ip.trim().to_string()))
            .filter(|ip| !ip.is_empty())
            .unwrap_or_else(|| "127.0.0.1".to_string())
    })
}

/// Guard for admin routes: validates the bearer token and requires the
/// `admin` permission. Failures become rejections handled by
/// `handle_rejection`.
pub(crate) fn require_admin(
    auth: Arc<AuthenticationAdapter>,
) -> impl Filter<Extract = (AuthContext,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization")
        .and(with(auth))
        .and_then(
            |header: Option<String>, auth: Arc<AuthenticationAdapter>| async move {
                let header = header.ok_or_else(|| {
                    warp::reject::custom(AppError::Authentication(
                        "missing authorization header".to_string(),
                    ))
                })?;
                auth.require_permission(&header, "admin")
                    .map_err(warp::reject::custom)
            },
        )
}

/// Map rejections (auth failures, bad bodies, unknown routes) to JSON errors
pub async fn handle_rejection(err: warp::Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(app_error) = err.find::<AppError>() {
        (app_error.http_status_code(), app_error.public_message())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if err
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request too large".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid query string".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": message })),
        status,
    ))
}

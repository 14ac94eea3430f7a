//! Prometheus metrics HTTP handler

use crate::application::services::MetricsService;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Reply;

pub async fn handle_metrics(
    metrics: Arc<MetricsService>,
) -> Result<warp::reply::Response, warp::Rejection> {
    let response = match metrics.render() {
        Ok(body) => warp::reply::with_status(body, StatusCode::OK).into_response(),
        Err(e) => warp::reply::with_status(
            format!("metrics unavailable: {}", e),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .into_response(),
    };
    Ok(response)
}

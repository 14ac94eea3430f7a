//! Attendance HTTP handlers

use crate::application::services::AttendanceService;
use crate::infrastructure::adapters::AuthContext;
use crate::infrastructure::http::handlers::RequestPipeline;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;

/// Body for opening a check-in window
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpenCheckinRequest {
    /// Defaults to the configured TTL
    pub ttl_minutes: Option<u32>,
}

/// Body for a self-service check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub token: String,
    pub registration_code: String,
}

pub async fn handle_open_checkin(
    event_id: String,
    _auth: AuthContext,
    body: OpenCheckinRequest,
    client_ip: String,
    service: Arc<AttendanceService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.attendance.open") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.open_checkin(&event_id, body.ttl_minutes).await;
    Ok(pipeline.finish(&context, result, StatusCode::CREATED))
}

pub async fn handle_close_checkin(
    token: String,
    _auth: AuthContext,
    client_ip: String,
    service: Arc<AttendanceService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.attendance.close") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service
        .close_checkin(&token)
        .await
        .map(|_| serde_json::json!({ "closed": true }));
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_check_in(
    body: CheckInRequest,
    client_ip: String,
    service: Arc<AttendanceService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "attendance.check_in") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.check_in(&body.token, &body.registration_code).await;
    Ok(pipeline.finish(&context, result, StatusCode::CREATED))
}

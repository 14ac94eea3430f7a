//! Admin dashboard HTTP handlers

use crate::application::services::DashboardService;
use crate::infrastructure::adapters::AuthContext;
use crate::infrastructure::http::handlers::RequestPipeline;
use std::sync::Arc;
use warp::http::StatusCode;

pub async fn handle_dashboard(
    _auth: AuthContext,
    client_ip: String,
    service: Arc<DashboardService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.dashboard") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.summary().await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

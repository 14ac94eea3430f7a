//! Authentication HTTP handlers

use crate::application::services::auth_service::LoginRequest;
use crate::application::services::AuthService;
use crate::infrastructure::http::handlers::RequestPipeline;
use std::sync::Arc;
use warp::http::StatusCode;

pub async fn handle_login(
    body: LoginRequest,
    client_ip: String,
    service: Arc<AuthService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "auth.login") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.login(body).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

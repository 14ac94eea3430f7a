//! Registration HTTP handlers

use crate::application::services::registration_service::RegistrationRequest;
use crate::application::services::RegistrationService;
use crate::infrastructure::http::handlers::RequestPipeline;
use std::sync::Arc;
use warp::http::StatusCode;

pub async fn handle_register(
    event_ref: String,
    body: RegistrationRequest,
    client_ip: String,
    service: Arc<RegistrationService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "registrations.create") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.register(&event_ref, body).await;
    Ok(pipeline.finish(&context, result, StatusCode::CREATED))
}

pub async fn handle_lookup_registration(
    registration_code: String,
    client_ip: String,
    service: Arc<RegistrationService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "registrations.lookup") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.lookup(&registration_code).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

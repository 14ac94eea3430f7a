//! Payments HTTP handlers

use crate::application::services::PaymentsService;
use crate::infrastructure::http::handlers::RequestPipeline;
use bytes::Bytes;
use std::sync::Arc;
use warp::http::StatusCode;

/// Webhook deliveries authenticate with an HMAC signature instead of the
/// per-client rate limit.
pub async fn handle_payment_webhook(
    raw_body: Bytes,
    signature: Option<String>,
    client_ip: String,
    service: Arc<PaymentsService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = pipeline.begin_unlimited(&client_ip, "payments.webhook");
    let result = service
        .handle_webhook(&raw_body, signature.as_deref(), &client_ip)
        .await
        .map(|outcome| serde_json::json!({ "outcome": outcome }));
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_payment_status(
    transaction_id: String,
    client_ip: String,
    service: Arc<PaymentsService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "payments.status") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.check_status(&transaction_id).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

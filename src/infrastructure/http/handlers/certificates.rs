//! Certificate HTTP handlers

use crate::application::services::certificates_service::TemplateUpsertRequest;
use crate::application::services::CertificatesService;
use crate::infrastructure::adapters::AuthContext;
use crate::infrastructure::http::handlers::RequestPipeline;
use crate::middleware::SecurityHeadersMiddleware;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Reply;

pub async fn handle_upsert_template(
    event_id: String,
    _auth: AuthContext,
    body: TemplateUpsertRequest,
    client_ip: String,
    service: Arc<CertificatesService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.certificates.template") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.upsert_template(&event_id, body).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_get_template(
    event_id: String,
    _auth: AuthContext,
    client_ip: String,
    service: Arc<CertificatesService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.certificates.get_template") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.get_template(&event_id).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_issue_certificates(
    event_id: String,
    _auth: AuthContext,
    client_ip: String,
    service: Arc<CertificatesService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.certificates.issue") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.issue_for_event(&event_id).await;
    Ok(pipeline.finish(&context, result, StatusCode::CREATED))
}

/// Serves the rendered certificate document as HTML
pub async fn handle_get_certificate(
    registration_code: String,
    client_ip: String,
    service: Arc<CertificatesService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "certificates.get") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };

    match service.render_for_code(&registration_code).await {
        Ok(html) => {
            pipeline.metrics.record_request(&context.endpoint, "ok");
            let mut response = warp::reply::html(html).into_response();
            SecurityHeadersMiddleware::new(&pipeline.config).apply(response.headers_mut());
            Ok(response)
        }
        Err(e) => Ok(pipeline.finish::<()>(&context, Err(e), StatusCode::OK)),
    }
}

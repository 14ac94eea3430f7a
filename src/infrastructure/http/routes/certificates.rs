//! Certificate routes

use crate::application::services::CertificatesService;
use crate::infrastructure::adapters::AuthenticationAdapter;
use crate::infrastructure::http::handlers::{
    handle_get_certificate, handle_get_template, handle_issue_certificates,
    handle_upsert_template, RequestPipeline,
};
use crate::infrastructure::http::routes::{client_ip, require_admin, with};
use std::sync::Arc;
use warp::Filter;

pub struct CertificatesRoutes;

impl CertificatesRoutes {
    pub fn create_routes(
        service: Arc<CertificatesService>,
        auth: Arc<AuthenticationAdapter>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let max_body = pipeline.config.server.max_request_size as u64;

        let upsert_template = warp::path("admin")
            .and(warp::path("events"))
            .and(warp::path::param::<String>())
            .and(warp::path("certificate-template"))
            .and(warp::path::end())
            .and(warp::put())
            .and(require_admin(auth.clone()))
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_upsert_template);

        let get_template = warp::path("admin")
            .and(warp::path("events"))
            .and(warp::path::param::<String>())
            .and(warp::path("certificate-template"))
            .and(warp::path::end())
            .and(warp::get())
            .and(require_admin(auth.clone()))
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_get_template);

        let issue = warp::path("admin")
            .and(warp::path("events"))
            .and(warp::path::param::<String>())
            .and(warp::path("certificates"))
            .and(warp::path::end())
            .and(warp::post())
            .and(require_admin(auth))
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_issue_certificates);

        let get_certificate = warp::path("certificates")
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and(client_ip())
            .and(with(service))
            .and(with(pipeline))
            .and_then(handle_get_certificate);

        upsert_template.or(get_template).or(issue).or(get_certificate)
    }
}

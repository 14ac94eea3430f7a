//! Authentication routes

use crate::application::services::AuthService;
use crate::infrastructure::http::handlers::{handle_login, RequestPipeline};
use crate::infrastructure::http::routes::{client_ip, with};
use std::sync::Arc;
use warp::Filter;

pub struct AuthRoutes;

impl AuthRoutes {
    pub fn create_routes(
        service: Arc<AuthService>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let max_body = pipeline.config.server.max_request_size as u64;

        warp::path("auth")
            .and(warp::path("login"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(client_ip())
            .and(with(service))
            .and(with(pipeline))
            .and_then(handle_login)
    }
}

//! Registration routes

use crate::application::services::RegistrationService;
use crate::infrastructure::http::handlers::{
    handle_lookup_registration, handle_register, RequestPipeline,
};
use crate::infrastructure::http::routes::{client_ip, with};
use std::sync::Arc;
use warp::Filter;

pub struct RegistrationsRoutes;

impl RegistrationsRoutes {
    pub fn create_routes(
        service: Arc<RegistrationService>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let max_body = pipeline.config.server.max_request_size as u64;

        let register = warp::path("events")
            .and(warp::path::param::<String>())
            .and(warp::path("registrations"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_register);

        let lookup = warp::path("registrations")
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and(client_ip())
            .and(with(service))
            .and(with(pipeline))
            .and_then(handle_lookup_registration);

        register.or(lookup)
    }
}

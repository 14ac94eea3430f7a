//! Payments routes

use crate::application::services::PaymentsService;
use crate::infrastructure::http::handlers::{
    handle_payment_status, handle_payment_webhook, RequestPipeline,
};
use crate::infrastructure::http::routes::{client_ip, with};
use std::sync::Arc;
use warp::Filter;

pub struct PaymentsRoutes;

impl PaymentsRoutes {
    pub fn create_routes(
        service: Arc<PaymentsService>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let max_body = pipeline.config.server.max_request_size as u64;

        let webhook = warp::path("payments")
            .and(warp::path("webhook"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::bytes())
            .and(warp::header::optional::<String>("x-callback-signature"))
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_payment_webhook);

        let status = warp::path("payments")
            .and(warp::path::param::<String>())
            .and(warp::path("status"))
            .and(warp::path::end())
            .and(warp::get())
            .and(client_ip())
            .and(with(service))
            .and(with(pipeline))
            .and_then(handle_payment_status);

        webhook.or(status)
    }
}

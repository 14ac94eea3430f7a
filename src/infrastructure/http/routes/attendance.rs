//! Attendance routes

use crate::application::services::AttendanceService;
use crate::infrastructure::adapters::AuthenticationAdapter;
use crate::infrastructure::http::handlers::{
    handle_check_in, handle_close_checkin, handle_open_checkin, RequestPipeline,
};
use crate::infrastructure::http::routes::{client_ip, require_admin, with};
use std::sync::Arc;
use warp::Filter;

pub struct AttendanceRoutes;

impl AttendanceRoutes {
    pub fn create_routes(
        service: Arc<AttendanceService>,
        auth: Arc<AuthenticationAdapter>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let max_body = pipeline.config.server.max_request_size as u64;

        let open = warp::path("admin")
            .and(warp::path("events"))
            .and(warp::path::param::<String>())
            .and(warp::path("checkin-token"))
            .and(warp::path::end())
            .and(warp::post())
            .and(require_admin(auth.clone()))
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_open_checkin);

        let close = warp::path("admin")
            .and(warp::path("checkin-token"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::delete())
            .and(require_admin(auth))
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_close_checkin);

        let check_in = warp::path("attendance")
            .and(warp::path("check-in"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(client_ip())
            .and(with(service))
            .and(with(pipeline))
            .and_then(handle_check_in);

        open.or(close).or(check_in)
    }
}

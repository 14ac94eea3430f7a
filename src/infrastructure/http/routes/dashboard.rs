//! Admin dashboard routes

use crate::application::services::DashboardService;
use crate::infrastructure::adapters::AuthenticationAdapter;
use crate::infrastructure::http::handlers::{handle_dashboard, RequestPipeline};
use crate::infrastructure::http::routes::{client_ip, require_admin, with};
use std::sync::Arc;
use warp::Filter;

pub struct DashboardRoutes;

impl DashboardRoutes {
    pub fn create_routes(
        service: Arc<DashboardService>,
        auth: Arc<AuthenticationAdapter>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("admin")
            .and(warp::path("dashboard"))
            .and(warp::path::end())
            .and(warp::get())
            .and(require_admin(auth))
            .and(client_ip())
            .and(with(service))
            .and(with(pipeline))
            .and_then(handle_dashboard)
    }
}

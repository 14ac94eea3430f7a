//! Metrics routes

use crate::application::services::MetricsService;
use crate::infrastructure::http::handlers::handle_metrics;
use crate::infrastructure::http::routes::with;
use std::sync::Arc;
use warp::Filter;

pub struct MetricsRoutes;

impl MetricsRoutes {
    pub fn create_routes(
        metrics: Arc<MetricsService>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("metrics")
            .and(warp::path::end())
            .and(warp::get())
            .and(with(metrics))
            .and_then(handle_metrics)
    }
}

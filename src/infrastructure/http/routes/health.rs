//! Health routes

use crate::infrastructure::http::handlers::handle_health;
use warp::Filter;

pub struct HealthRoutes;

impl HealthRoutes {
    pub fn create_routes(
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .and_then(handle_health)
    }
}

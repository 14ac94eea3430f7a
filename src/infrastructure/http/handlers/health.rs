//! Health check HTTP handler

use warp::Reply;

pub async fn handle_health() -> Result<warp::reply::Response, warp::Rejection> {
    Ok(warp::reply::json(&serde_json::json!({ "status": "healthy" })).into_response())
}

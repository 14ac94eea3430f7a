//! Event HTTP handlers

use crate::application::services::events_service::EventUpsertRequest;
use crate::application::services::EventsService;
use crate::infrastructure::adapters::AuthContext;
use crate::infrastructure::http::handlers::RequestPipeline;
use crate::infrastructure::http::models::PageQuery;
use std::sync::Arc;
use warp::http::StatusCode;

pub async fn handle_list_events(
    query: PageQuery,
    client_ip: String,
    service: Arc<EventsService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "events.list") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let (limit, offset) = query.limit_offset(&pipeline.config.content);
    let result = service.list_public(limit, offset).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_get_event(
    slug_or_id: String,
    client_ip: String,
    service: Arc<EventsService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "events.get") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.get_public(&slug_or_id).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_admin_list_events(
    _auth: AuthContext,
    query: PageQuery,
    client_ip: String,
    service: Arc<EventsService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.events.list") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let (limit, offset) = query.limit_offset(&pipeline.config.content);
    let result = service.list_all(limit, offset).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_create_event(
    _auth: AuthContext,
    body: EventUpsertRequest,
    client_ip: String,
    service: Arc<EventsService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.events.create") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.create(body).await;
    Ok(pipeline.finish(&context, result, StatusCode::CREATED))
}

pub async fn handle_update_event(
    event_id: String,
    _auth: AuthContext,
    body: EventUpsertRequest,
    client_ip: String,
    service: Arc<EventsService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.events.update") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.update(&event_id, body).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_delete_event(
    event_id: String,
    _auth: AuthContext,
    client_ip: String,
    service: Arc<EventsService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.events.delete") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service
        .delete(&event_id)
        .await
        .map(|_| serde_json::json!({ "deleted": true }));
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_list_participants(
    event_id: String,
    _auth: AuthContext,
    query: PageQuery,
    client_ip: String,
    service: Arc<EventsService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.events.participants") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let (limit, offset) = query.limit_offset(&pipeline.config.content);
    let result = service.list_participants(&event_id, limit, offset).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

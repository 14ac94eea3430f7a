//! Article and testimonial HTTP handlers

use crate::application::services::content_service::{
    ArticleUpsertRequest, TestimonialSubmitRequest,
};
use crate::application::services::ContentService;
use crate::infrastructure::adapters::AuthContext;
use crate::infrastructure::http::handlers::RequestPipeline;
use crate::infrastructure::http::models::PageQuery;
use std::sync::Arc;
use warp::http::StatusCode;

pub async fn handle_list_articles(
    query: PageQuery,
    client_ip: String,
    service: Arc<ContentService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "articles.list") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let (limit, offset) = query.limit_offset(&pipeline.config.content);
    let result = service.list_articles(true, limit, offset).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_get_article(
    slug: String,
    client_ip: String,
    service: Arc<ContentService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "articles.get") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.get_public_article(&slug).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_create_article(
    _auth: AuthContext,
    body: ArticleUpsertRequest,
    client_ip: String,
    service: Arc<ContentService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.articles.create") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.create_article(body).await;
    Ok(pipeline.finish(&context, result, StatusCode::CREATED))
}

pub async fn handle_update_article(
    article_id: String,
    _auth: AuthContext,
    body: ArticleUpsertRequest,
    client_ip: String,
    service: Arc<ContentService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.articles.update") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.update_article(&article_id, body).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_delete_article(
    article_id: String,
    _auth: AuthContext,
    client_ip: String,
    service: Arc<ContentService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.articles.delete") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service
        .delete_article(&article_id)
        .await
        .map(|_| serde_json::json!({ "deleted": true }));
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_list_testimonials(
    query: PageQuery,
    client_ip: String,
    service: Arc<ContentService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "testimonials.list") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let (limit, offset) = query.limit_offset(&pipeline.config.content);
    let result = service.list_testimonials(true, limit, offset).await;
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_submit_testimonial(
    body: TestimonialSubmitRequest,
    client_ip: String,
    service: Arc<ContentService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "testimonials.submit") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service.submit_testimonial(body).await;
    Ok(pipeline.finish(&context, result, StatusCode::CREATED))
}

pub async fn handle_approve_testimonial(
    testimonial_id: String,
    _auth: AuthContext,
    client_ip: String,
    service: Arc<ContentService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.testimonials.approve") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service
        .approve_testimonial(&testimonial_id)
        .await
        .map(|_| serde_json::json!({ "approved": true }));
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

pub async fn handle_delete_testimonial(
    testimonial_id: String,
    _auth: AuthContext,
    client_ip: String,
    service: Arc<ContentService>,
    pipeline: RequestPipeline,
) -> Result<warp::reply::Response, warp::Rejection> {
    let context = match pipeline.begin(&client_ip, "admin.testimonials.delete") {
        Ok(context) => context,
        Err(response) => return Ok(response),
    };
    let result = service
        .delete_testimonial(&testimonial_id)
        .await
        .map(|_| serde_json::json!({ "deleted": true }));
    Ok(pipeline.finish(&context, result, StatusCode::OK))
}

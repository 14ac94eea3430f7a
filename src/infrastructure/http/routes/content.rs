//! Article and testimonial routes

use crate::application::services::ContentService;
use crate::infrastructure::adapters::AuthenticationAdapter;
use crate::infrastructure::http::handlers::{
    handle_approve_testimonial, handle_create_article, handle_delete_article,
    handle_delete_testimonial, handle_get_article, handle_list_articles,
    handle_list_testimonials, handle_submit_testimonial, handle_update_article, RequestPipeline,
};
use crate::infrastructure::http::models::PageQuery;
use crate::infrastructure::http::routes::{client_ip, require_admin, with};
use std::sync::Arc;
use warp::Filter;

pub struct ContentRoutes;

impl ContentRoutes {
    pub fn create_routes(
        service: Arc<ContentService>,
        auth: Arc<AuthenticationAdapter>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let max_body = pipeline.config.server.max_request_size as u64;

        let list_articles = warp::path("articles")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<PageQuery>())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_list_articles);

        let get_article = warp::path("articles")
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_get_article);

        let create_article = warp::path("admin")
            .and(warp::path("articles"))
            .and(warp::path::end())
            .and(warp::post())
            .and(require_admin(auth.clone()))
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_create_article);

        let update_article = warp::path("admin")
            .and(warp::path("articles"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::put())
            .and(require_admin(auth.clone()))
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_update_article);

        let delete_article = warp::path("admin")
            .and(warp::path("articles"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::delete())
            .and(require_admin(auth.clone()))
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_delete_article);

        let list_testimonials = warp::path("testimonials")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<PageQuery>())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_list_testimonials);

        let submit_testimonial = warp::path("testimonials")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_submit_testimonial);

        let approve_testimonial = warp::path("admin")
            .and(warp::path("testimonials"))
            .and(warp::path::param::<String>())
            .and(warp::path("approve"))
            .and(warp::path::end())
            .and(warp::post())
            .and(require_admin(auth.clone()))
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_approve_testimonial);

        let delete_testimonial = warp::path("admin")
            .and(warp::path("testimonials"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::delete())
            .and(require_admin(auth))
            .and(client_ip())
            .and(with(service))
            .and(with(pipeline))
            .and_then(handle_delete_testimonial);

        list_articles
            .or(get_article)
            .or(create_article)
            .or(update_article)
            .or(delete_article)
            .or(list_testimonials)
            .or(submit_testimonial)
            .or(approve_testimonial)
            .or(delete_testimonial)
    }
}

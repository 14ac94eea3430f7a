//! Event routes

use crate::application::services::EventsService;
use crate::infrastructure::adapters::AuthenticationAdapter;
use crate::infrastructure::http::handlers::{
    handle_admin_list_events, handle_create_event, handle_delete_event, handle_get_event,
    handle_list_events, handle_list_participants, handle_update_event, RequestPipeline,
};
use crate::infrastructure::http::models::PageQuery;
use crate::infrastructure::http::routes::{client_ip, require_admin, with};
use std::sync::Arc;
use warp::Filter;

pub struct EventsRoutes;

impl EventsRoutes {
    pub fn create_routes(
        service: Arc<EventsService>,
        auth: Arc<AuthenticationAdapter>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let max_body = pipeline.config.server.max_request_size as u64;

        let list = warp::path("events")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<PageQuery>())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_list_events);

        let get = warp::path("events")
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_get_event);

        let admin_list = warp::path("admin")
            .and(warp::path("events"))
            .and(warp::path::end())
            .and(warp::get())
            .and(require_admin(auth.clone()))
            .and(warp::query::<PageQuery>())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_admin_list_events);

        let create = warp::path("admin")
            .and(warp::path("events"))
            .and(warp::path::end())
            .and(warp::post())
            .and(require_admin(auth.clone()))
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_create_event);

        let update = warp::path("admin")
            .and(warp::path("events"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::put())
            .and(require_admin(auth.clone()))
            .and(warp::body::content_length_limit(max_body))
            .and(warp::body::json())
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_update_event);

        let delete = warp::path("admin")
            .and(warp::path("events"))
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::delete())
            .and(require_admin(auth.clone()))
            .and(client_ip())
            .and(with(service.clone()))
            .and(with(pipeline.clone()))
            .and_then(handle_delete_event);

        let participants = warp::path("admin")
            .and(warp::path("events"))
            .and(warp::path::param::<String>())
            .and(warp::path("participants"))
            .and(warp::path::end())
            .and(warp::get())
            .and(require_admin(auth))
            .and(warp::query::<PageQuery>())
            .and(client_ip())
            .and(with(service))
            .and(with(pipeline))
            .and_then(handle_list_participants);

        list.or(get)
            .or(admin_list)
            .or(create)
            .or(participants)
            .or(update)
            .or(delete)
    }
}

//! Route builder module
//!
//! Composes the per-resource route groups into the application's filter
//! tree and attaches rejection handling.

use crate::application::services::{
    AttendanceService, AuthService, CertificatesService, ContentService, DashboardService,
    EventsService, MetricsService, PaymentsService, RegistrationService,
};
use crate::config::AppConfig;
use crate::infrastructure::adapters::AuthenticationAdapter;
use crate::infrastructure::http::handlers::RequestPipeline;
use crate::infrastructure::http::routes::{
    attendance::AttendanceRoutes, auth::AuthRoutes, certificates::CertificatesRoutes,
    content::ContentRoutes, dashboard::DashboardRoutes, events::EventsRoutes,
    handle_rejection, health::HealthRoutes, metrics::MetricsRoutes, payments::PaymentsRoutes,
    registrations::RegistrationsRoutes,
};
use crate::middleware::RateLimitMiddleware;
use std::sync::Arc;
use warp::Filter;

/// Everything the HTTP surface needs, assembled once at startup
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub auth_adapter: Arc<AuthenticationAdapter>,
    pub rate_limiter: Arc<RateLimitMiddleware>,
    pub auth_service: Arc<AuthService>,
    pub events_service: Arc<EventsService>,
    pub registration_service: Arc<RegistrationService>,
    pub payments_service: Arc<PaymentsService>,
    pub attendance_service: Arc<AttendanceService>,
    pub certificates_service: Arc<CertificatesService>,
    pub content_service: Arc<ContentService>,
    pub dashboard_service: Arc<DashboardService>,
    pub metrics_service: Arc<MetricsService>,
}

/// Route builder that orchestrates the creation of all application routes
pub struct RouteBuilder;

impl RouteBuilder {
    /// Build all application routes; rejections are rendered as JSON, so
    /// the composed filter is infallible
    pub fn build_routes(
        context: AppContext,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        let pipeline = RequestPipeline::new(
            context.config.clone(),
            context.rate_limiter.clone(),
            context.metrics_service.clone(),
        );

        let auth_routes = AuthRoutes::create_routes(context.auth_service, pipeline.clone());

        let events_routes = EventsRoutes::create_routes(
            context.events_service,
            context.auth_adapter.clone(),
            pipeline.clone(),
        );

        let registrations_routes =
            RegistrationsRoutes::create_routes(context.registration_service, pipeline.clone());

        let payments_routes =
            PaymentsRoutes::create_routes(context.payments_service, pipeline.clone());

        let attendance_routes = AttendanceRoutes::create_routes(
            context.attendance_service,
            context.auth_adapter.clone(),
            pipeline.clone(),
        );

        let certificates_routes = CertificatesRoutes::create_routes(
            context.certificates_service,
            context.auth_adapter.clone(),
            pipeline.clone(),
        );

        let content_routes = ContentRoutes::create_routes(
            context.content_service,
            context.auth_adapter.clone(),
            pipeline.clone(),
        );

        let dashboard_routes = DashboardRoutes::create_routes(
            context.dashboard_service,
            context.auth_adapter,
            pipeline,
        );

        let health_route = HealthRoutes::create_routes();
        let metrics_route = MetricsRoutes::create_routes(context.metrics_service);

        // registration must match ahead of the /events/{slug} fallthrough
        registrations_routes
            .or(events_routes)
            .or(payments_routes)
            .or(attendance_routes)
            .or(certificates_routes)
            .or(content_routes)
            .or(auth_routes)
            .or(dashboard_routes)
            .or(health_route)
            .or(metrics_route)
            .recover(handle_rejection)
    }
}

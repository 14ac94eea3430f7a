//! Application services

pub mod attendance_service;
pub mod auth_service;
pub mod certificates_service;
pub mod content_service;
pub mod dashboard_service;
pub mod events_service;
pub mod metrics_service;
pub mod payments_service;
pub mod registration_service;

pub use attendance_service::AttendanceService;
pub use auth_service::AuthService;
pub use certificates_service::CertificatesService;
pub use content_service::ContentService;
pub use dashboard_service::DashboardService;
pub use events_service::EventsService;
pub use metrics_service::MetricsService;
pub use payments_service::PaymentsService;
pub use registration_service::RegistrationService;

//! Infrastructure adapters: persistence, external services, auth plumbing

pub mod attendance_repository;
pub mod attendance_store;
pub mod authentication;
pub mod certificate_renderer;
pub mod certificates_repository;
pub mod content_repository;
pub mod database;
pub mod events_repository;
pub mod mailer;
pub mod participants_repository;
pub mod payment_gateway;
pub mod token_issuer;
pub mod transactions_repository;
pub mod users_repository;

pub use attendance_repository::AttendanceRepository;
pub use attendance_store::AttendanceStore;
pub use authentication::{AuthContext, AuthenticationAdapter};
pub use certificate_renderer::CertificateRenderer;
pub use certificates_repository::CertificatesRepository;
pub use content_repository::ContentRepository;
pub use events_repository::EventsRepository;
pub use mailer::Mailer;
pub use participants_repository::ParticipantsRepository;
pub use payment_gateway::{HttpPaymentGateway, NewInvoice, PaymentGateway};
pub use token_issuer::TokenIssuerAdapter;
pub use transactions_repository::TransactionsRepository;
pub use users_repository::UsersRepository;

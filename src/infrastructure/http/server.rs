//! HTTP server implementation for reverse proxy deployment
//!
//! Assembles the persistence layer, adapters and services, then serves the
//! composed routes. TLS, compression and CORS belong to the reverse proxy.

use crate::application::services::{
    AttendanceService, AuthService, CertificatesService, ContentService, DashboardService,
    EventsService, MetricsService, PaymentsService, RegistrationService,
};
use crate::config::AppConfig;
use crate::infrastructure::adapters::{
    database, AttendanceRepository, AttendanceStore, AuthenticationAdapter,
    CertificatesRepository, ContentRepository, EventsRepository, HttpPaymentGateway, Mailer,
    ParticipantsRepository, PaymentGateway, TokenIssuerAdapter, TransactionsRepository,
    UsersRepository,
};
use crate::infrastructure::http::routes::{AppContext, RouteBuilder};
use crate::middleware::RateLimitMiddleware;
use crate::shared::error::{AppError, AppResult};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, instrument};
use warp::{Filter, Reply};

/// How often pending transactions are checked for invoice expiry
const EXPIRY_SWEEP_INTERVAL_SECS: u64 = 300;

/// Main server
pub struct HttpServer {
    context: AppContext,
    attendance_store: Arc<AttendanceStore>,
}

impl HttpServer {
    /// Create a new server instance against the configured database and
    /// payment gateway
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        let pool = database::connect(&config.database).await?;
        let gateway: Arc<dyn PaymentGateway> =
            Arc::new(HttpPaymentGateway::new(Arc::new(config.clone()))?);
        Self::assemble(config, pool, gateway).await
    }

    /// Wire repositories, adapters and services into the app context
    pub(crate) async fn assemble(
        config: AppConfig,
        pool: SqlitePool,
        gateway: Arc<dyn PaymentGateway>,
    ) -> AppResult<Self> {
        let config_arc = Arc::new(config.clone());

        // repositories
        let events_repo = Arc::new(EventsRepository::new(pool.clone()));
        let participants_repo = Arc::new(ParticipantsRepository::new(pool.clone()));
        let transactions_repo = Arc::new(TransactionsRepository::new(pool.clone()));
        let attendance_repo = Arc::new(AttendanceRepository::new(pool.clone()));
        let certificates_repo = Arc::new(CertificatesRepository::new(pool.clone()));
        let content_repo = Arc::new(ContentRepository::new(pool.clone()));
        let users_repo = Arc::new(UsersRepository::new(pool));

        // adapters
        let attendance_store = Arc::new(AttendanceStore::new(config.attendance.token_length));
        let mailer = Arc::new(Mailer::new(config.email.clone()));
        let token_issuer = Arc::new(TokenIssuerAdapter::new(config_arc.clone()));
        let auth_adapter = Arc::new(AuthenticationAdapter::new(config_arc.clone()));

        // services
        let metrics_service = Arc::new(MetricsService::new()?);
        let payments_service = Arc::new(PaymentsService::new(
            config_arc.clone(),
            gateway,
            transactions_repo.clone(),
            participants_repo.clone(),
            events_repo.clone(),
            mailer.clone(),
            metrics_service.clone(),
        ));
        let registration_service = Arc::new(RegistrationService::new(
            events_repo.clone(),
            participants_repo.clone(),
            transactions_repo.clone(),
            attendance_repo.clone(),
            payments_service.clone(),
            mailer,
            metrics_service.clone(),
        ));
        let attendance_service = Arc::new(AttendanceService::new(
            config_arc.clone(),
            attendance_store.clone(),
            attendance_repo.clone(),
            participants_repo.clone(),
            events_repo.clone(),
            metrics_service.clone(),
        ));
        let certificates_service = Arc::new(CertificatesService::new(
            certificates_repo,
            participants_repo.clone(),
            attendance_repo.clone(),
            events_repo.clone(),
            metrics_service.clone(),
        ));
        let events_service = Arc::new(EventsService::new(
            config_arc.clone(),
            events_repo.clone(),
            participants_repo.clone(),
        ));
        let content_service = Arc::new(ContentService::new(content_repo));
        let dashboard_service = Arc::new(DashboardService::new(
            events_repo,
            participants_repo,
            attendance_repo,
            transactions_repo,
        ));
        let auth_service = Arc::new(AuthService::new(users_repo, token_issuer));

        auth_service.bootstrap_admin(&config).await?;

        let context = AppContext {
            rate_limiter: Arc::new(RateLimitMiddleware::new(&config)),
            config,
            auth_adapter,
            auth_service,
            events_service,
            registration_service,
            payments_service,
            attendance_service,
            certificates_service,
            content_service,
            dashboard_service,
            metrics_service,
        };

        Ok(Self {
            context,
            attendance_store,
        })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.context.config
    }

    /// Run the HTTP server
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr = self.context.config.server_address();
        let addr: std::net::SocketAddr = addr
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        let sweep_interval = self.context.config.attendance.sweep_interval_seconds;
        let _token_sweeper = self.attendance_store.clone().start_sweeper(sweep_interval);
        let _expiry_sweeper = Self::start_expiry_sweeper(self.context.payments_service.clone());

        let routes = self.create_routes();

        info!("Starting HTTP server (reverse proxy mode) on {}", addr);
        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Create the application routes
    pub fn create_routes(
        &self,
    ) -> impl Filter<Extract = impl Reply, Error = std::convert::Infallible> + Clone {
        RouteBuilder::build_routes(self.context.clone())
    }

    /// Periodically expire pending transactions whose invoices lapsed
    fn start_expiry_sweeper(payments: Arc<PaymentsService>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(
                EXPIRY_SWEEP_INTERVAL_SECS,
            ));
            loop {
                ticker.tick().await;
                match payments.expire_overdue().await {
                    Ok(0) => {}
                    Ok(count) => info!(count = count, "Expired overdue transactions"),
                    Err(e) => tracing::warn!(error = %e, "Expiry sweep failed"),
                }
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Server harness for filter-level integration tests

    use super::*;
    use crate::infrastructure::adapters::payment_gateway::mock::MockGateway;

    pub struct TestServer {
        pub server: HttpServer,
        pub gateway: Arc<MockGateway>,
    }

    /// In-memory server with the mock gateway, rate limiting off
    pub async fn create_test_server() -> TestServer {
        let mut config = AppConfig::default();
        config.rate_limit.enabled = false;
        config.security.enable_request_logging = false;

        let pool = database::connect_in_memory().await.expect("test database");
        let gateway = Arc::new(MockGateway::new());
        let server = HttpServer::assemble(config, pool, gateway.clone())
            .await
            .expect("test server");

        TestServer { server, gateway }
    }
}

//! Metrics utilities module
//!
//! Prometheus registry and the application counters exposed at /metrics.

use crate::shared::error::{AppError, AppResult};
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Application metrics backed by a prometheus registry
pub struct AppMetrics {
    registry: Registry,

    /// Requests by endpoint and outcome ("ok" / "error" / "rate_limited")
    pub http_requests: IntCounterVec,

    /// Registrations accepted (free and paid)
    pub registrations_total: IntCounter,

    /// Transactions confirmed by the gateway (paid or settled)
    pub payments_confirmed_total: IntCounter,

    /// Webhook deliveries rejected before processing
    pub webhooks_rejected_total: IntCounter,

    /// Successful self-service check-ins
    pub checkins_total: IntCounter,

    /// Certificates issued
    pub certificates_issued_total: IntCounter,
}

impl AppMetrics {
    /// Create a new registry and register all application counters
    pub fn new() -> AppResult<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("eventpass_http_requests_total", "HTTP requests by endpoint and outcome"),
            &["endpoint", "outcome"],
        )
        .map_err(|e| AppError::Internal(format!("metrics init: {}", e)))?;

        let registrations_total = IntCounter::new(
            "eventpass_registrations_total",
            "Registrations accepted (free and paid)",
        )
        .map_err(|e| AppError::Internal(format!("metrics init: {}", e)))?;

        let payments_confirmed_total = IntCounter::new(
            "eventpass_payments_confirmed_total",
            "Transactions confirmed by the payment gateway",
        )
        .map_err(|e| AppError::Internal(format!("metrics init: {}", e)))?;

        let webhooks_rejected_total = IntCounter::new(
            "eventpass_webhooks_rejected_total",
            "Webhook deliveries rejected before processing",
        )
        .map_err(|e| AppError::Internal(format!("metrics init: {}", e)))?;

        let checkins_total = IntCounter::new(
            "eventpass_checkins_total",
            "Successful self-service check-ins",
        )
        .map_err(|e| AppError::Internal(format!("metrics init: {}", e)))?;

        let certificates_issued_total = IntCounter::new(
            "eventpass_certificates_issued_total",
            "Certificates issued",
        )
        .map_err(|e| AppError::Internal(format!("metrics init: {}", e)))?;

        registry
            .register(Box::new(http_requests.clone()))
            .and_then(|_| registry.register(Box::new(registrations_total.clone())))
            .and_then(|_| registry.register(Box::new(payments_confirmed_total.clone())))
            .and_then(|_| registry.register(Box::new(webhooks_rejected_total.clone())))
            .and_then(|_| registry.register(Box::new(checkins_total.clone())))
            .and_then(|_| registry.register(Box::new(certificates_issued_total.clone())))
            .map_err(|e| AppError::Internal(format!("metrics registration: {}", e)))?;

        Ok(Self {
            registry,
            http_requests,
            registrations_total,
            payments_confirmed_total,
            webhooks_rejected_total,
            checkins_total,
            certificates_issued_total,
        })
    }

    /// Render the registry in the prometheus text exposition format
    pub fn encode(&self) -> AppResult<String> {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&families, &mut buffer)
            .map_err(|e| AppError::Internal(format!("metrics encoding: {}", e)))?;
        String::from_utf8(buffer).map_err(|e| AppError::Internal(format!("metrics encoding: {}", e)))
    }
}

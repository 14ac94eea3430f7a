//! Metrics service wrapping the prometheus registry

use crate::shared::error::AppResult;
use crate::shared::metrics::AppMetrics;
use std::sync::Arc;

/// Application-facing metrics facade
pub struct MetricsService {
    metrics: Arc<AppMetrics>,
}

impl MetricsService {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            metrics: Arc::new(AppMetrics::new()?),
        })
    }

    pub fn record_request(&self, endpoint: &str, outcome: &str) {
        self.metrics
            .http_requests
            .with_label_values(&[endpoint, outcome])
            .inc();
    }

    pub fn record_registration(&self) {
        self.metrics.registrations_total.inc();
    }

    pub fn record_payment_confirmed(&self) {
        self.metrics.payments_confirmed_total.inc();
    }

    pub fn record_webhook_rejected(&self) {
        self.metrics.webhooks_rejected_total.inc();
    }

    pub fn record_checkin(&self) {
        self.metrics.checkins_total.inc();
    }

    pub fn record_certificates_issued(&self, count: u64) {
        self.metrics.certificates_issued_total.inc_by(count);
    }

    /// Render the prometheus text exposition body
    pub fn render(&self) -> AppResult<String> {
        self.metrics.encode()
    }
}

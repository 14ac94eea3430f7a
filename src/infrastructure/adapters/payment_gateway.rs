//! Payment gateway integration adapter
//!
//! This module handles communication with the external payment gateway that
//! hosts checkout invoices.

use crate::config::AppConfig;
use crate::domain::payments::{GatewayInvoice, InvoiceStatus};
use crate::shared::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Request to open a hosted checkout invoice
#[derive(Debug, Clone, Serialize)]
pub struct NewInvoice {
    /// Our transaction id, echoed back by the gateway
    pub external_ref: String,
    pub amount_cents: i64,
    pub currency: String,
    pub description: String,
    pub customer_name: String,
    pub customer_email: String,
    /// Invoice validity in minutes
    pub ttl_minutes: u32,
}

/// Gateway seam. The HTTP implementation talks to the real provider; tests
/// use the scripted mock.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_invoice(&self, request: &NewInvoice) -> AppResult<GatewayInvoice>;
    async fn fetch_invoice(&self, invoice_id: &str) -> AppResult<GatewayInvoice>;
}

/// Invoice representation on the wire
#[derive(Debug, Deserialize)]
struct InvoicePayload {
    id: String,
    invoice_url: String,
    status: String,
    #[serde(default)]
    expiry_date: Option<DateTime<Utc>>,
}

impl InvoicePayload {
    fn into_domain(self) -> AppResult<GatewayInvoice> {
        let status: InvoiceStatus = self
            .status
            .parse()
            .map_err(|e: String| AppError::Gateway(e))?;
        Ok(GatewayInvoice {
            id: self.id,
            checkout_url: self.invoice_url,
            status,
            expires_at: self.expiry_date,
        })
    }
}

#[derive(Debug, Serialize)]
struct CreateInvoiceBody<'a> {
    external_id: &'a str,
    amount: i64,
    currency: &'a str,
    description: &'a str,
    payer_name: &'a str,
    payer_email: &'a str,
    invoice_duration_seconds: u64,
}

/// HTTP client for the gateway's hosted-invoice API
pub struct HttpPaymentGateway {
    config: Arc<AppConfig>,
    client: Client,
}

impl HttpPaymentGateway {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.payments.timeout_seconds))
            .build()
            .map_err(|e| AppError::Config(format!("gateway client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn invoices_url(&self) -> String {
        format!(
            "{}/v2/invoices",
            self.config.payments.gateway_base_url.trim_end_matches('/')
        )
    }

    /// Execute one gateway call with bounded retries on transport errors.
    /// Non-2xx responses are not retried; the gateway treats them as final.
    async fn send_with_retries(&self, build: impl Fn() -> reqwest::RequestBuilder) -> AppResult<InvoicePayload> {
        let max_retries = self.config.payments.max_retries;
        let mut attempt = 0u32;

        loop {
            let result = build().send().await;
            match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .json::<InvoicePayload>()
                            .await
                            .map_err(|e| AppError::Gateway(format!("invalid gateway response: {}", e)));
                    }
                    let body = response.text().await.unwrap_or_default();
                    if status.as_u16() == 404 {
                        return Err(AppError::NotFound("gateway invoice".to_string()));
                    }
                    return Err(AppError::Gateway(format!(
                        "gateway returned {}: {}",
                        status, body
                    )));
                }
                Err(e) if attempt < max_retries => {
                    attempt += 1;
                    warn!(attempt = attempt, error = %e, "Gateway request failed, retrying");
                    tokio::time::sleep(Duration::from_millis(200 * u64::from(attempt))).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_invoice(&self, request: &NewInvoice) -> AppResult<GatewayInvoice> {
        debug!(external_ref = %request.external_ref, "Creating gateway invoice");

        let url = self.invoices_url();
        let api_key = self.config.payments.gateway_api_key.clone();
        let body = CreateInvoiceBody {
            external_id: &request.external_ref,
            amount: request.amount_cents,
            currency: &request.currency,
            description: &request.description,
            payer_name: &request.customer_name,
            payer_email: &request.customer_email,
            invoice_duration_seconds: u64::from(request.ttl_minutes) * 60,
        };
        let body = serde_json::to_value(&body)?;

        let payload = self
            .send_with_retries(|| {
                self.client
                    .post(&url)
                    .bearer_auth(&api_key)
                    .json(&body)
            })
            .await?;
        payload.into_domain()
    }

    async fn fetch_invoice(&self, invoice_id: &str) -> AppResult<GatewayInvoice> {
        let url = format!("{}/{}", self.invoices_url(), invoice_id);
        let api_key = self.config.payments.gateway_api_key.clone();

        let payload = self
            .send_with_retries(|| self.client.get(&url).bearer_auth(&api_key))
            .await?;
        payload.into_domain()
    }
}

#[cfg(test)]
pub mod mock {
    //! Scripted gateway used by service and route tests

    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockGateway {
        invoices: Mutex<HashMap<String, GatewayInvoice>>,
        counter: Mutex<u64>,
        pub fail_create: Mutex<bool>,
    }

    impl MockGateway {
        pub fn new() -> Self {
            Self::default()
        }

        /// Flip the stored status, as if the gateway had processed a payment
        pub async fn set_status(&self, invoice_id: &str, status: InvoiceStatus) {
            if let Some(invoice) = self.invoices.lock().await.get_mut(invoice_id) {
                invoice.status = status;
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for MockGateway {
        async fn create_invoice(&self, request: &NewInvoice) -> AppResult<GatewayInvoice> {
            if *self.fail_create.lock().await {
                return Err(AppError::Gateway("mock gateway unavailable".to_string()));
            }

            let mut counter = self.counter.lock().await;
            *counter += 1;
            let id = format!("inv_mock_{}", *counter);
            let invoice = GatewayInvoice {
                id: id.clone(),
                checkout_url: format!("https://pay.mock.test/{}", id),
                status: InvoiceStatus::Pending,
                expires_at: Some(Utc::now() + chrono::Duration::minutes(i64::from(request.ttl_minutes))),
            };
            self.invoices.lock().await.insert(id, invoice.clone());
            Ok(invoice)
        }

        async fn fetch_invoice(&self, invoice_id: &str) -> AppResult<GatewayInvoice> {
            self.invoices
                .lock()
                .await
                .get(invoice_id)
                .cloned()
                .ok_or_else(|| AppError::NotFound("gateway invoice".to_string()))
        }
    }
}

//! Payment service orchestrating checkout creation, webhook reconciliation,
//! status polling and invoice expiry

use crate::application::services::metrics_service::MetricsService;
use crate::config::AppConfig;
use crate::domain::events::Event;
use crate::domain::payments::{
    InvoiceStatus, Transaction, TransactionStatus, WebhookEvent,
};
use crate::infrastructure::adapters::{
    EventsRepository, Mailer, NewInvoice, ParticipantsRepository, PaymentGateway,
    TransactionsRepository,
};
use crate::shared::error::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Registrant details captured at checkout time
#[derive(Debug, Clone)]
pub struct Registrant {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Response for payment status queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub transaction_id: String,
    pub status: TransactionStatus,
    pub amount_cents: i64,
    pub currency: String,
    pub checkout_url: String,
    pub expires_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

/// What a webhook delivery did to the stored transaction
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WebhookOutcome {
    /// The transaction moved to a new status
    Updated,
    /// Redelivery of the status we already hold
    Unchanged,
    /// Transition rejected by the guard (e.g. downgrade of a settled invoice)
    Ignored,
}

pub struct PaymentsService {
    config: Arc<AppConfig>,
    gateway: Arc<dyn PaymentGateway>,
    transactions: Arc<TransactionsRepository>,
    participants: Arc<ParticipantsRepository>,
    events: Arc<EventsRepository>,
    mailer: Arc<Mailer>,
    metrics: Arc<MetricsService>,
}

impl PaymentsService {
    pub fn new(
        config: Arc<AppConfig>,
        gateway: Arc<dyn PaymentGateway>,
        transactions: Arc<TransactionsRepository>,
        participants: Arc<ParticipantsRepository>,
        events: Arc<EventsRepository>,
        mailer: Arc<Mailer>,
        metrics: Arc<MetricsService>,
    ) -> Self {
        Self {
            config,
            gateway,
            transactions,
            participants,
            events,
            mailer,
            metrics,
        }
    }

    /// Open a gateway invoice and record the pending transaction
    pub async fn create_checkout(
        &self,
        event: &Event,
        registrant: &Registrant,
    ) -> AppResult<Transaction> {
        if !self.config.payments.enabled {
            return Err(AppError::Security("payments disabled".into()));
        }

        let transaction_id = Uuid::new_v4().to_string();
        let ttl_minutes = self.config.payments.invoice_ttl_minutes;

        let invoice = self
            .gateway
            .create_invoice(&NewInvoice {
                external_ref: transaction_id.clone(),
                amount_cents: event.price_cents,
                currency: event.currency.clone(),
                description: format!("Registration for {}", event.title),
                customer_name: registrant.name.clone(),
                customer_email: registrant.email.clone(),
                ttl_minutes,
            })
            .await?;

        let now = Utc::now();
        let expires_at = invoice
            .expires_at
            .unwrap_or_else(|| now + Duration::minutes(i64::from(ttl_minutes)));

        let transaction = Transaction {
            id: transaction_id,
            event_id: event.id.clone(),
            registrant_name: registrant.name.clone(),
            registrant_email: registrant.email.clone(),
            registrant_phone: registrant.phone.clone(),
            amount_cents: event.price_cents,
            currency: event.currency.clone(),
            status: invoice.status.to_transaction_status(),
            gateway_invoice_id: invoice.id,
            checkout_url: invoice.checkout_url,
            created_at: now,
            updated_at: now,
            expires_at,
            paid_at: None,
        };
        self.transactions.insert(&transaction).await?;

        info!(
            transaction_id = %transaction.id,
            invoice_id = %transaction.gateway_invoice_id,
            event_id = %event.id,
            "Gateway invoice created"
        );
        Ok(transaction)
    }

    /// Verify the HMAC-SHA256 signature over the raw webhook body
    fn verify_webhook_signature(&self, raw_body: &[u8], signature_hex: &str) -> AppResult<()> {
        let signature = hex::decode(signature_hex.trim())
            .map_err(|_| AppError::Authentication("malformed webhook signature".into()))?;

        let mut mac = HmacSha256::new_from_slice(self.config.payments.webhook_secret.as_bytes())
            .map_err(|e| AppError::Internal(format!("webhook hmac: {}", e)))?;
        mac.update(raw_body);
        mac.verify_slice(&signature)
            .map_err(|_| AppError::Authentication("webhook signature mismatch".into()))
    }

    /// Process a webhook delivery: verify the signature before touching the
    /// body, map the external status, and reconcile.
    pub async fn handle_webhook(
        &self,
        raw_body: &[u8],
        signature_hex: Option<&str>,
        client_ip: &str,
    ) -> AppResult<WebhookOutcome> {
        let signature_hex = signature_hex.ok_or_else(|| {
            self.metrics.record_webhook_rejected();
            AppError::Authentication("missing webhook signature".into())
        })?;

        if let Err(e) = self.verify_webhook_signature(raw_body, signature_hex) {
            self.metrics.record_webhook_rejected();
            crate::shared::logging::LoggingUtils::log_security_event(
                "webhook_signature_rejected",
                &e.to_string(),
                client_ip,
            );
            return Err(e);
        }

        let event: WebhookEvent = serde_json::from_slice(raw_body)?;
        let status: InvoiceStatus = event
            .status
            .parse()
            .map_err(|e: String| AppError::Validation(e))?;

        self.reconcile(&event.invoice_id, status, event.paid_at).await
    }

    /// Apply a gateway-reported status to the stored transaction.
    ///
    /// Idempotent under redelivery: a status we already hold is a no-op, and
    /// the transition guard drops anything that would downgrade a confirmed
    /// invoice. Confirmation creates the participant atomically.
    pub async fn reconcile(
        &self,
        invoice_id: &str,
        status: InvoiceStatus,
        paid_at: Option<DateTime<Utc>>,
    ) -> AppResult<WebhookOutcome> {
        let transaction = self
            .transactions
            .find_by_invoice_id(invoice_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("invoice {}", invoice_id)))?;

        let next = status.to_transaction_status();
        if transaction.status == next {
            return Ok(WebhookOutcome::Unchanged);
        }
        if !transaction.status.can_transition_to(next) {
            warn!(
                transaction_id = %transaction.id,
                from = transaction.status.as_str(),
                to = next.as_str(),
                "Rejected status transition from gateway"
            );
            return Ok(WebhookOutcome::Ignored);
        }

        let was_confirmed = transaction.status.is_confirmed();
        let paid_at = if next.is_confirmed() {
            Some(paid_at.unwrap_or_else(Utc::now))
        } else {
            None
        };
        self.transactions
            .update_status(&transaction.id, next, paid_at)
            .await?;

        info!(
            transaction_id = %transaction.id,
            from = transaction.status.as_str(),
            to = next.as_str(),
            "Transaction status updated"
        );

        if next.is_confirmed() && !was_confirmed {
            self.metrics.record_payment_confirmed();

            let participant = self
                .participants
                .upsert_registered(
                    &transaction.event_id,
                    &transaction.registrant_name,
                    &transaction.registrant_email,
                    transaction.registrant_phone.as_deref(),
                )
                .await?;

            self.mailer
                .send_registration_confirmed(
                    &transaction.registrant_email,
                    &transaction.registrant_name,
                    &self.event_title_for(&transaction).await,
                    &participant.registration_code,
                )
                .await;
        }

        Ok(WebhookOutcome::Updated)
    }

    async fn event_title_for(&self, transaction: &Transaction) -> String {
        // best effort; the email degrades gracefully without a title
        match self.events.find_by_id(&transaction.event_id).await {
            Ok(Some(event)) => event.title,
            _ => "your event".to_string(),
        }
    }

    /// Return stored state; while pending, poll the gateway and reconcile
    /// exactly as the webhook path does.
    pub async fn check_status(&self, transaction_id: &str) -> AppResult<PaymentStatusResponse> {
        let transaction = self
            .transactions
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("transaction {}", transaction_id)))?;

        if transaction.status == TransactionStatus::Pending {
            if transaction.is_expired() {
                self.transactions
                    .update_status(&transaction.id, TransactionStatus::Expired, None)
                    .await?;
            } else {
                match self.gateway.fetch_invoice(&transaction.gateway_invoice_id).await {
                    Ok(invoice) => {
                        self.reconcile(&transaction.gateway_invoice_id, invoice.status, None)
                            .await?;
                    }
                    Err(e) => {
                        // keep serving the stored state when the gateway is down
                        warn!(
                            transaction_id = %transaction.id,
                            error = %e,
                            "Gateway poll failed"
                        );
                    }
                }
            }
        }

        let transaction = self
            .transactions
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("transaction {}", transaction_id)))?;

        Ok(PaymentStatusResponse {
            transaction_id: transaction.id,
            status: transaction.status,
            amount_cents: transaction.amount_cents,
            currency: transaction.currency,
            checkout_url: transaction.checkout_url,
            expires_at: transaction.expires_at,
            paid_at: transaction.paid_at,
        })
    }

    /// Mark pending transactions past their invoice expiry as expired
    pub async fn expire_overdue(&self) -> AppResult<usize> {
        let overdue = self.transactions.list_overdue(Utc::now()).await?;
        let count = overdue.len();
        for transaction in overdue {
            self.transactions
                .update_status(&transaction.id, TransactionStatus::Expired, None)
                .await?;
            info!(transaction_id = %transaction.id, "Pending transaction expired");
        }
        Ok(count)
    }
}

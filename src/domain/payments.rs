//! Payments domain models and types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Internal transaction status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Settled,
    Expired,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Paid => "paid",
            TransactionStatus::Settled => "settled",
            TransactionStatus::Expired => "expired",
            TransactionStatus::Failed => "failed",
        }
    }

    /// Paid or settled: the gateway has confirmed money movement
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TransactionStatus::Paid | TransactionStatus::Settled)
    }

    /// Terminal states accept no further transitions except Paid -> Settled
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Settled | TransactionStatus::Expired | TransactionStatus::Failed
        )
    }

    /// Transition guard: reject downgrades and rewrites of terminal states
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        if *self == next {
            return false;
        }
        match self {
            TransactionStatus::Pending => true,
            TransactionStatus::Paid => matches!(
                next,
                TransactionStatus::Settled | TransactionStatus::Failed
            ),
            _ => false,
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "paid" => Ok(TransactionStatus::Paid),
            "settled" => Ok(TransactionStatus::Settled),
            "expired" => Ok(TransactionStatus::Expired),
            "failed" => Ok(TransactionStatus::Failed),
            _ => Err(format!("unsupported transaction status: {}", s)),
        }
    }
}

/// Status reported by the payment gateway for a hosted invoice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Settled,
    Expired,
    Failed,
}

impl InvoiceStatus {
    /// Map the external status onto the internal transaction status
    pub fn to_transaction_status(self) -> TransactionStatus {
        match self {
            InvoiceStatus::Pending => TransactionStatus::Pending,
            InvoiceStatus::Paid => TransactionStatus::Paid,
            InvoiceStatus::Settled => TransactionStatus::Settled,
            InvoiceStatus::Expired => TransactionStatus::Expired,
            InvoiceStatus::Failed => TransactionStatus::Failed,
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(InvoiceStatus::Pending),
            "PAID" => Ok(InvoiceStatus::Paid),
            "SETTLED" => Ok(InvoiceStatus::Settled),
            "EXPIRED" => Ok(InvoiceStatus::Expired),
            "FAILED" => Ok(InvoiceStatus::Failed),
            _ => Err(format!("unsupported invoice status: {}", s)),
        }
    }
}

/// A gateway-hosted checkout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayInvoice {
    /// External invoice id assigned by the gateway
    pub id: String,
    pub checkout_url: String,
    pub status: InvoiceStatus,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Payment transaction persisted in the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub event_id: String,
    /// Registrant snapshot; the participant row is created on confirmation
    pub registrant_name: String,
    pub registrant_email: String,
    pub registrant_phone: Option<String>,
    pub amount_cents: i64,
    pub currency: String,
    pub status: TransactionStatus,
    pub gateway_invoice_id: String,
    pub checkout_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn is_expired(&self) -> bool {
        self.status == TransactionStatus::Pending && Utc::now() > self.expires_at
    }
}

/// Webhook payload pushed by the gateway on invoice status changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// External invoice id
    pub invoice_id: String,
    /// External status string, mapped via `InvoiceStatus`
    pub status: String,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_status_mapping_is_case_insensitive() {
        assert_eq!("paid".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert_eq!("SETTLED".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Settled);
        assert!("VOIDED".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_transition_guard_rejects_downgrades() {
        assert!(TransactionStatus::Pending.can_transition_to(TransactionStatus::Paid));
        assert!(TransactionStatus::Pending.can_transition_to(TransactionStatus::Expired));
        assert!(TransactionStatus::Paid.can_transition_to(TransactionStatus::Settled));
        assert!(!TransactionStatus::Paid.can_transition_to(TransactionStatus::Pending));
        assert!(!TransactionStatus::Settled.can_transition_to(TransactionStatus::Pending));
        assert!(!TransactionStatus::Settled.can_transition_to(TransactionStatus::Settled));
        assert!(!TransactionStatus::Expired.can_transition_to(TransactionStatus::Paid));
    }

    #[test]
    fn test_confirmed_states() {
        assert!(TransactionStatus::Paid.is_confirmed());
        assert!(TransactionStatus::Settled.is_confirmed());
        assert!(!TransactionStatus::Pending.is_confirmed());
        assert!(!TransactionStatus::Failed.is_confirmed());
    }
}

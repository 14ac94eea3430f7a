//! SQLite-backed transactions repository

use crate::domain::payments::{Transaction, TransactionStatus};
use crate::shared::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: String,
    event_id: String,
    registrant_name: String,
    registrant_email: String,
    registrant_phone: Option<String>,
    amount_cents: i64,
    currency: String,
    status: String,
    gateway_invoice_id: String,
    checkout_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
}

impl TransactionRow {
    fn into_domain(self) -> AppResult<Transaction> {
        let status: TransactionStatus = self.status.parse().map_err(AppError::Internal)?;
        Ok(Transaction {
            id: self.id,
            event_id: self.event_id,
            registrant_name: self.registrant_name,
            registrant_email: self.registrant_email,
            registrant_phone: self.registrant_phone,
            amount_cents: self.amount_cents,
            currency: self.currency,
            status,
            gateway_invoice_id: self.gateway_invoice_id,
            checkout_url: self.checkout_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            expires_at: self.expires_at,
            paid_at: self.paid_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, event_id, registrant_name, registrant_email, registrant_phone, \
     amount_cents, currency, status, gateway_invoice_id, checkout_url, created_at, updated_at, \
     expires_at, paid_at";

/// Repository for payment transactions
#[derive(Clone)]
pub struct TransactionsRepository {
    pool: SqlitePool,
}

impl TransactionsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, transaction: &Transaction) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO transactions (id, event_id, registrant_name, registrant_email, \
             registrant_phone, amount_cents, currency, status, gateway_invoice_id, checkout_url, \
             created_at, updated_at, expires_at, paid_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&transaction.id)
        .bind(&transaction.event_id)
        .bind(&transaction.registrant_name)
        .bind(&transaction.registrant_email)
        .bind(&transaction.registrant_phone)
        .bind(transaction.amount_cents)
        .bind(&transaction.currency)
        .bind(transaction.status.as_str())
        .bind(&transaction.gateway_invoice_id)
        .bind(&transaction.checkout_url)
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .bind(transaction.expires_at)
        .bind(transaction.paid_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                "gateway invoice already recorded".to_string(),
            )),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM transactions WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(TransactionRow::into_domain).transpose()
    }

    pub async fn find_by_invoice_id(&self, invoice_id: &str) -> AppResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM transactions WHERE gateway_invoice_id = ?",
            SELECT_COLUMNS
        ))
        .bind(invoice_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(TransactionRow::into_domain).transpose()
    }

    /// Pending transaction for a registrant, used to hand back the same
    /// checkout on repeated registration attempts
    pub async fn find_pending_for_registrant(
        &self,
        event_id: &str,
        email: &str,
    ) -> AppResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM transactions WHERE event_id = ? AND registrant_email = ? \
             AND status = 'pending' ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(TransactionRow::into_domain).transpose()
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: TransactionStatus,
        paid_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE transactions SET status = ?, paid_at = COALESCE(?, paid_at), updated_at = ? \
             WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(paid_at)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("transaction {}", id)));
        }
        Ok(())
    }

    pub async fn list_recent(&self, limit: u32) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM transactions ORDER BY created_at DESC LIMIT ?",
            SELECT_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(TransactionRow::into_domain).collect()
    }

    /// Pending transactions whose invoice expiry has passed
    pub async fn list_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM transactions WHERE status = 'pending' AND expires_at < ?",
            SELECT_COLUMNS
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(TransactionRow::into_domain).collect()
    }

    /// Sum of confirmed (paid or settled) transaction amounts
    pub async fn sum_confirmed_amount(&self) -> AppResult<i64> {
        let sum: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(amount_cents) FROM transactions WHERE status IN ('paid', 'settled')",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(sum.unwrap_or(0))
    }

    pub async fn count_by_status(&self, status: TransactionStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

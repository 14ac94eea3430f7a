//! Admin dashboard aggregates

use crate::domain::events::EventStatus;
use crate::domain::payments::{Transaction, TransactionStatus};
use crate::infrastructure::adapters::{
    AttendanceRepository, EventsRepository, ParticipantsRepository, TransactionsRepository,
};
use crate::shared::error::AppResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Dashboard payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_events: i64,
    pub published_events: i64,
    pub total_participants: i64,
    pub total_checkins: i64,
    /// Sum of confirmed transaction amounts
    pub revenue_cents: i64,
    pub pending_transactions: i64,
    pub settled_transactions: i64,
    pub failed_transactions: i64,
    pub recent_transactions: Vec<Transaction>,
}

pub struct DashboardService {
    events: Arc<EventsRepository>,
    participants: Arc<ParticipantsRepository>,
    attendance: Arc<AttendanceRepository>,
    transactions: Arc<TransactionsRepository>,
}

impl DashboardService {
    pub fn new(
        events: Arc<EventsRepository>,
        participants: Arc<ParticipantsRepository>,
        attendance: Arc<AttendanceRepository>,
        transactions: Arc<TransactionsRepository>,
    ) -> Self {
        Self {
            events,
            participants,
            attendance,
            transactions,
        }
    }

    pub async fn summary(&self) -> AppResult<DashboardSummary> {
        Ok(DashboardSummary {
            total_events: self.events.count(None).await?,
            published_events: self.events.count(Some(EventStatus::Published)).await?,
            total_participants: self.participants.count_total().await?,
            total_checkins: self.attendance.count_total().await?,
            revenue_cents: self.transactions.sum_confirmed_amount().await?,
            pending_transactions: self
                .transactions
                .count_by_status(TransactionStatus::Pending)
                .await?,
            settled_transactions: self
                .transactions
                .count_by_status(TransactionStatus::Settled)
                .await?,
            failed_transactions: self
                .transactions
                .count_by_status(TransactionStatus::Failed)
                .await?,
            recent_transactions: self.transactions.list_recent(10).await?,
        })
    }
}

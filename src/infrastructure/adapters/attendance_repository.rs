//! SQLite-backed attendance records

use crate::domain::attendance::AttendanceRecord;
use crate::shared::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: String,
    event_id: String,
    participant_id: String,
    checked_in_at: DateTime<Utc>,
}

impl AttendanceRow {
    fn into_domain(self) -> AttendanceRecord {
        AttendanceRecord {
            id: self.id,
            event_id: self.event_id,
            participant_id: self.participant_id,
            checked_in_at: self.checked_in_at,
        }
    }
}

/// Repository for persisted check-ins
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: SqlitePool,
}

impl AttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a check-in. A second check-in for the same participant is a
    /// conflict.
    pub async fn insert(&self, event_id: &str, participant_id: &str) -> AppResult<AttendanceRecord> {
        let record = AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            participant_id: participant_id.to_string(),
            checked_in_at: Utc::now(),
        };

        let result = sqlx::query(
            "INSERT INTO attendance (id, event_id, participant_id, checked_in_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.event_id)
        .bind(&record.participant_id)
        .bind(record.checked_in_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::Conflict("participant already checked in".to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    pub async fn list_for_event(&self, event_id: &str) -> AppResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            "SELECT id, event_id, participant_id, checked_in_at FROM attendance \
             WHERE event_id = ? ORDER BY checked_in_at ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(AttendanceRow::into_domain).collect())
    }

    pub async fn has_attended(&self, event_id: &str, participant_id: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM attendance WHERE event_id = ? AND participant_id = ?",
        )
        .bind(event_id)
        .bind(participant_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn count_total(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

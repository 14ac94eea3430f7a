//! Attendance domain models and types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short-lived token gating self-service check-in for one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceToken {
    pub token: String,
    pub event_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AttendanceToken {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// A persisted check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub event_id: String,
    pub participant_id: String,
    pub checked_in_at: DateTime<Utc>,
}

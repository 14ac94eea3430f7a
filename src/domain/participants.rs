//! Participant domain models and types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Participant registration status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    PendingPayment,
    Registered,
    Cancelled,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::PendingPayment => "pending_payment",
            ParticipantStatus::Registered => "registered",
            ParticipantStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for ParticipantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending_payment" => Ok(ParticipantStatus::PendingPayment),
            "registered" => Ok(ParticipantStatus::Registered),
            "cancelled" => Ok(ParticipantStatus::Cancelled),
            _ => Err(format!("unsupported participant status: {}", s)),
        }
    }
}

/// A registered (or registering) participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Short unique code used for self-service lookup, check-in and certificates
    pub registration_code: String,
    pub status: ParticipantStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Participant {
    pub fn can_check_in(&self) -> bool {
        self.status == ParticipantStatus::Registered
    }
}

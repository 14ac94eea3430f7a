//! Event domain models and types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Archived,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Archived => "archived",
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "archived" => Ok(EventStatus::Archived),
            _ => Err(format!("unsupported event status: {}", s)),
        }
    }
}

/// A listed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// 0 means unlimited
    pub capacity: i64,
    /// 0 means free admission
    pub price_cents: i64,
    pub currency: String,
    pub status: EventStatus,
    pub banner_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }

    /// Registration stays open until the event has ended
    pub fn registration_open(&self) -> bool {
        self.status == EventStatus::Published && Utc::now() < self.ends_at
    }

    pub fn has_capacity_limit(&self) -> bool {
        self.capacity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_event(status: EventStatus, ends_in_minutes: i64) -> Event {
        let now = Utc::now();
        Event {
            id: "ev_1".into(),
            slug: "rust-meetup".into(),
            title: "Rust Meetup".into(),
            description: "Monthly meetup".into(),
            venue: "Community Hall".into(),
            starts_at: now - Duration::hours(1),
            ends_at: now + Duration::minutes(ends_in_minutes),
            capacity: 100,
            price_cents: 0,
            currency: "USD".into(),
            status,
            banner_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_registration_open_only_while_published_and_running() {
        assert!(sample_event(EventStatus::Published, 60).registration_open());
        assert!(!sample_event(EventStatus::Draft, 60).registration_open());
        assert!(!sample_event(EventStatus::Published, -10).registration_open());
    }

    #[test]
    fn test_status_round_trip() {
        for s in ["draft", "published", "archived"] {
            let parsed: EventStatus = s.parse().unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert!("cancelled".parse::<EventStatus>().is_err());
    }
}

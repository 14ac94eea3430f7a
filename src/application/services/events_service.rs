//! Events service: public catalogue and admin CRUD

use crate::config::AppConfig;
use crate::domain::events::{Event, EventStatus};
use crate::domain::participants::Participant;
use crate::infrastructure::adapters::{EventsRepository, ParticipantsRepository};
use crate::shared::error::{AppError, AppResult};
use crate::shared::validation::{is_valid_slug, slugify};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Create/update request for an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventUpsertRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Derived from the title when omitted
    pub slug: Option<String>,

    #[validate(length(max = 20000))]
    pub description: String,

    #[validate(length(min = 1, max = 300))]
    pub venue: String,

    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    #[validate(range(min = 0))]
    pub capacity: i64,

    #[validate(range(min = 0))]
    pub price_cents: i64,

    /// Defaults to the configured currency
    pub currency: Option<String>,

    pub status: Option<EventStatus>,

    #[validate(url)]
    pub banner_url: Option<String>,
}

/// Event plus registration counters for the admin views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWithCounts {
    #[serde(flatten)]
    pub event: Event,
    pub taken_seats: i64,
}

pub struct EventsService {
    config: Arc<AppConfig>,
    events: Arc<EventsRepository>,
    participants: Arc<ParticipantsRepository>,
}

impl EventsService {
    pub fn new(
        config: Arc<AppConfig>,
        events: Arc<EventsRepository>,
        participants: Arc<ParticipantsRepository>,
    ) -> Self {
        Self {
            config,
            events,
            participants,
        }
    }

    fn validate_request(&self, request: &EventUpsertRequest) -> AppResult<String> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if request.ends_at <= request.starts_at {
            return Err(AppError::Validation("event must end after it starts".into()));
        }

        let slug = match &request.slug {
            Some(slug) => slug.clone(),
            None => slugify(&request.title),
        };
        if !is_valid_slug(&slug) {
            return Err(AppError::Validation(format!("invalid slug: {}", slug)));
        }
        Ok(slug)
    }

    /// Create an event (admin); new events start as drafts unless a status
    /// is given
    pub async fn create(&self, request: EventUpsertRequest) -> AppResult<Event> {
        let slug = self.validate_request(&request)?;
        let now = Utc::now();

        let event = Event {
            id: Uuid::new_v4().to_string(),
            slug,
            title: request.title,
            description: request.description,
            venue: request.venue,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            capacity: request.capacity,
            price_cents: request.price_cents,
            currency: request
                .currency
                .unwrap_or_else(|| self.config.payments.currency.clone()),
            status: request.status.unwrap_or(EventStatus::Draft),
            banner_url: request.banner_url,
            created_at: now,
            updated_at: now,
        };
        self.events.insert(&event).await?;
        Ok(event)
    }

    /// Update an event (admin)
    pub async fn update(&self, id: &str, request: EventUpsertRequest) -> AppResult<Event> {
        let slug = self.validate_request(&request)?;

        let mut event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("event {}", id)))?;

        event.slug = slug;
        event.title = request.title;
        event.description = request.description;
        event.venue = request.venue;
        event.starts_at = request.starts_at;
        event.ends_at = request.ends_at;
        event.capacity = request.capacity;
        event.price_cents = request.price_cents;
        if let Some(currency) = request.currency {
            event.currency = currency;
        }
        if let Some(status) = request.status {
            event.status = status;
        }
        event.banner_url = request.banner_url;
        event.updated_at = Utc::now();

        self.events.update(&event).await?;
        Ok(event)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.events.delete(id).await
    }

    /// Public fetch by slug (falls back to id); only published events are
    /// visible
    pub async fn get_public(&self, slug_or_id: &str) -> AppResult<Event> {
        let event = match self.events.find_by_slug(slug_or_id).await? {
            Some(event) => Some(event),
            None => self.events.find_by_id(slug_or_id).await?,
        };

        match event {
            Some(event) if event.status == EventStatus::Published => Ok(event),
            _ => Err(AppError::NotFound(format!("event {}", slug_or_id))),
        }
    }

    pub async fn list_public(&self, limit: u32, offset: u32) -> AppResult<Vec<Event>> {
        self.events
            .list(Some(EventStatus::Published), limit, offset)
            .await
    }

    /// Admin listing across all statuses
    pub async fn list_all(&self, limit: u32, offset: u32) -> AppResult<Vec<EventWithCounts>> {
        let events = self.events.list(None, limit, offset).await?;
        let mut out = Vec::with_capacity(events.len());
        for event in events {
            let taken_seats = self.events.count_taken_seats(&event.id).await?;
            out.push(EventWithCounts { event, taken_seats });
        }
        Ok(out)
    }

    /// Admin participant listing for one event
    pub async fn list_participants(
        &self,
        event_id: &str,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Participant>> {
        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(AppError::NotFound(format!("event {}", event_id)));
        }
        self.participants
            .list_for_event(event_id, limit, offset)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::database::connect_in_memory;
    use chrono::Duration;

    async fn service() -> EventsService {
        let pool = connect_in_memory().await.unwrap();
        EventsService::new(
            Arc::new(AppConfig::default()),
            Arc::new(EventsRepository::new(pool.clone())),
            Arc::new(ParticipantsRepository::new(pool)),
        )
    }

    fn request(title: &str) -> EventUpsertRequest {
        let now = Utc::now();
        EventUpsertRequest {
            title: title.to_string(),
            slug: None,
            description: "A fine event".into(),
            venue: "Main Hall".into(),
            starts_at: now + Duration::days(10),
            ends_at: now + Duration::days(10) + Duration::hours(2),
            capacity: 0,
            price_cents: 0,
            currency: None,
            status: None,
            banner_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_derives_slug_and_defaults() {
        let service = service().await;
        let event = service.create(request("Rust Meetup 2026!")).await.unwrap();

        assert_eq!(event.slug, "rust-meetup-2026");
        assert_eq!(event.status, EventStatus::Draft);
        assert_eq!(event.currency, "USD");
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_dates() {
        let service = service().await;
        let mut req = request("Backwards");
        req.ends_at = req.starts_at - Duration::hours(1);

        let err = service.create(req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_public_fetch_hides_drafts() {
        let service = service().await;
        let draft = service.create(request("Hidden")).await.unwrap();

        let err = service.get_public(&draft.slug).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let mut req = request("Visible");
        req.status = Some(EventStatus::Published);
        let published = service.create(req).await.unwrap();
        let fetched = service.get_public(&published.slug).await.unwrap();
        assert_eq!(fetched.id, published.id);
    }

    #[tokio::test]
    async fn test_update_changes_fields() {
        let service = service().await;
        let event = service.create(request("Original")).await.unwrap();

        let mut req = request("Renamed");
        req.status = Some(EventStatus::Published);
        req.price_cents = 1500;
        let updated = service.update(&event.id, req).await.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.slug, "renamed");
        assert_eq!(updated.price_cents, 1500);
        assert_eq!(updated.status, EventStatus::Published);
    }
}

//! SQLite-backed events repository

use crate::domain::events::{Event, EventStatus};
use crate::shared::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    slug: String,
    title: String,
    description: String,
    venue: String,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    capacity: i64,
    price_cents: i64,
    currency: String,
    status: String,
    banner_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EventRow {
    fn into_domain(self) -> AppResult<Event> {
        let status: EventStatus = self.status.parse().map_err(AppError::Internal)?;
        Ok(Event {
            id: self.id,
            slug: self.slug,
            title: self.title,
            description: self.description,
            venue: self.venue,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            capacity: self.capacity,
            price_cents: self.price_cents,
            currency: self.currency,
            status,
            banner_url: self.banner_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, slug, title, description, venue, starts_at, ends_at, \
     capacity, price_cents, currency, status, banner_url, created_at, updated_at";

/// Repository for event rows
#[derive(Clone)]
pub struct EventsRepository {
    pool: SqlitePool,
}

impl EventsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, event: &Event) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO events (id, slug, title, description, venue, starts_at, ends_at, \
             capacity, price_cents, currency, status, banner_url, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&event.id)
        .bind(&event.slug)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.venue)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.capacity)
        .bind(event.price_cents)
        .bind(&event.currency)
        .bind(event.status.as_str())
        .bind(&event.banner_url)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                format!("event slug already exists: {}", event.slug),
            )),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn update(&self, event: &Event) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE events SET slug = ?, title = ?, description = ?, venue = ?, starts_at = ?, \
             ends_at = ?, capacity = ?, price_cents = ?, currency = ?, status = ?, \
             banner_url = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&event.slug)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.venue)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.capacity)
        .bind(event.price_cents)
        .bind(&event.currency)
        .bind(event.status.as_str())
        .bind(&event.banner_url)
        .bind(Utc::now())
        .bind(&event.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("event {}", event.id)));
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("event {}", id)));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM events WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(EventRow::into_domain).transpose()
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {} FROM events WHERE slug = ?",
            SELECT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        row.map(EventRow::into_domain).transpose()
    }

    /// List events, optionally restricted to one status, newest first
    pub async fn list(
        &self,
        status: Option<EventStatus>,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Event>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, EventRow>(&format!(
                    "SELECT {} FROM events WHERE status = ? ORDER BY starts_at DESC LIMIT ? OFFSET ?",
                    SELECT_COLUMNS
                ))
                .bind(status.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EventRow>(&format!(
                    "SELECT {} FROM events ORDER BY starts_at DESC LIMIT ? OFFSET ?",
                    SELECT_COLUMNS
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(EventRow::into_domain).collect()
    }

    pub async fn count(&self, status: Option<EventStatus>) -> AppResult<i64> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE status = ?")
                    .bind(status.as_str())
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM events")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    /// Seats already taken: live participants plus pending paid registrations
    pub async fn count_taken_seats(&self, event_id: &str) -> AppResult<i64> {
        let participants: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM participants WHERE event_id = ? AND status != 'cancelled'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        let pending: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM transactions WHERE event_id = ? AND status = 'pending'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(participants + pending)
    }
}

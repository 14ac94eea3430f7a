//! SQLite-backed participants repository

use crate::domain::participants::{Participant, ParticipantStatus};
use crate::shared::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    id: String,
    event_id: String,
    name: String,
    email: String,
    phone: Option<String>,
    registration_code: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ParticipantRow {
    fn into_domain(self) -> AppResult<Participant> {
        let status: ParticipantStatus = self.status.parse().map_err(AppError::Internal)?;
        Ok(Participant {
            id: self.id,
            event_id: self.event_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            registration_code: self.registration_code,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, event_id, name, email, phone, registration_code, status, created_at, updated_at";

/// Generate a short human-friendly registration code
fn generate_registration_code() -> String {
    // 10 hex chars from a v4 uuid keep the code short enough to type
    let raw = Uuid::new_v4().simple().to_string();
    format!("REG-{}", &raw[..10].to_uppercase())
}

/// Repository for participant rows
#[derive(Clone)]
pub struct ParticipantsRepository {
    pool: SqlitePool,
}

impl ParticipantsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a brand-new participant. Duplicate (event, email) is a conflict.
    pub async fn insert(
        &self,
        event_id: &str,
        name: &str,
        email: &str,
        phone: Option<&str>,
        status: ParticipantStatus,
    ) -> AppResult<Participant> {
        let now = Utc::now();
        let participant = Participant {
            id: Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(|p| p.to_string()),
            registration_code: generate_registration_code(),
            status,
            created_at: now,
            updated_at: now,
        };

        let result = sqlx::query(
            "INSERT INTO participants (id, event_id, name, email, phone, registration_code, \
             status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&participant.id)
        .bind(&participant.event_id)
        .bind(&participant.name)
        .bind(&participant.email)
        .bind(&participant.phone)
        .bind(&participant.registration_code)
        .bind(participant.status.as_str())
        .bind(participant.created_at)
        .bind(participant.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(participant),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                "email already registered for this event".to_string(),
            )),
            Err(other) => Err(other.into()),
        }
    }

    /// Idempotent participant creation used by payment reconciliation.
    ///
    /// Runs inside one SQL transaction: insert-or-ignore on the
    /// (event_id, email) unique key, then re-select and promote to
    /// `registered` if needed. Redelivered webhooks and concurrent status
    /// polls converge on the same row.
    pub async fn upsert_registered(
        &self,
        event_id: &str,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> AppResult<Participant> {
        let mut tx = self.pool.begin().await?;

        let now = Utc::now();
        sqlx::query(
            "INSERT INTO participants (id, event_id, name, email, phone, registration_code, \
             status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(event_id, email) DO NOTHING",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(event_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(generate_registration_code())
        .bind(ParticipantStatus::Registered.as_str())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, ParticipantRow>(&format!(
            "SELECT {} FROM participants WHERE event_id = ? AND email = ?",
            SELECT_COLUMNS
        ))
        .bind(event_id)
        .bind(email)
        .fetch_one(&mut *tx)
        .await?;

        if row.status != ParticipantStatus::Registered.as_str() {
            sqlx::query("UPDATE participants SET status = ?, updated_at = ? WHERE id = ?")
                .bind(ParticipantStatus::Registered.as_str())
                .bind(now)
                .bind(&row.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let mut participant = row.into_domain()?;
        participant.status = ParticipantStatus::Registered;
        Ok(participant)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Participant>> {
        let row = sqlx::query_as::<_, ParticipantRow>(&format!(
            "SELECT {} FROM participants WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(ParticipantRow::into_domain).transpose()
    }

    pub async fn find_by_code(&self, registration_code: &str) -> AppResult<Option<Participant>> {
        let row = sqlx::query_as::<_, ParticipantRow>(&format!(
            "SELECT {} FROM participants WHERE registration_code = ?",
            SELECT_COLUMNS
        ))
        .bind(registration_code)
        .fetch_optional(&self.pool)
        .await?;
        row.map(ParticipantRow::into_domain).transpose()
    }

    pub async fn find_by_event_and_email(
        &self,
        event_id: &str,
        email: &str,
    ) -> AppResult<Option<Participant>> {
        let row = sqlx::query_as::<_, ParticipantRow>(&format!(
            "SELECT {} FROM participants WHERE event_id = ? AND email = ?",
            SELECT_COLUMNS
        ))
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(ParticipantRow::into_domain).transpose()
    }

    pub async fn list_for_event(
        &self,
        event_id: &str,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Participant>> {
        let rows = sqlx::query_as::<_, ParticipantRow>(&format!(
            "SELECT {} FROM participants WHERE event_id = ? ORDER BY created_at ASC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        ))
        .bind(event_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ParticipantRow::into_domain).collect()
    }

    pub async fn count_total(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE status != 'cancelled'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{Event, EventStatus};
    use crate::infrastructure::adapters::database::connect_in_memory;
    use crate::infrastructure::adapters::events_repository::EventsRepository;
    use chrono::Duration;

    async fn seed_event(pool: &SqlitePool) -> String {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4().to_string(),
            slug: "seeded".into(),
            title: "Seeded".into(),
            description: "d".into(),
            venue: "v".into(),
            starts_at: now,
            ends_at: now + Duration::hours(2),
            capacity: 0,
            price_cents: 0,
            currency: "USD".into(),
            status: EventStatus::Published,
            banner_url: None,
            created_at: now,
            updated_at: now,
        };
        EventsRepository::new(pool.clone()).insert(&event).await.unwrap();
        event.id
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email_per_event() {
        let pool = connect_in_memory().await.unwrap();
        let event_id = seed_event(&pool).await;
        let repo = ParticipantsRepository::new(pool);

        repo.insert(&event_id, "Ana", "ana@example.com", None, ParticipantStatus::Registered)
            .await
            .unwrap();
        let err = repo
            .insert(&event_id, "Ana Again", "ana@example.com", None, ParticipantStatus::Registered)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_upsert_registered_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        let event_id = seed_event(&pool).await;
        let repo = ParticipantsRepository::new(pool);

        let first = repo
            .upsert_registered(&event_id, "Bo", "bo@example.com", Some("+15550100"))
            .await
            .unwrap();
        let second = repo
            .upsert_registered(&event_id, "Bo", "bo@example.com", Some("+15550100"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.registration_code, second.registration_code);
        assert_eq!(second.status, ParticipantStatus::Registered);
    }

    #[tokio::test]
    async fn test_upsert_promotes_pending_participant() {
        let pool = connect_in_memory().await.unwrap();
        let event_id = seed_event(&pool).await;
        let repo = ParticipantsRepository::new(pool);

        let pending = repo
            .insert(&event_id, "Cy", "cy@example.com", None, ParticipantStatus::PendingPayment)
            .await
            .unwrap();
        let promoted = repo
            .upsert_registered(&event_id, "Cy", "cy@example.com", None)
            .await
            .unwrap();

        assert_eq!(pending.id, promoted.id);
        assert_eq!(promoted.status, ParticipantStatus::Registered);

        let reloaded = repo.find_by_id(&pending.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, ParticipantStatus::Registered);
    }

    #[tokio::test]
    async fn test_find_by_code() {
        let pool = connect_in_memory().await.unwrap();
        let event_id = seed_event(&pool).await;
        let repo = ParticipantsRepository::new(pool);

        let p = repo
            .insert(&event_id, "Di", "di@example.com", None, ParticipantStatus::Registered)
            .await
            .unwrap();
        assert!(p.registration_code.starts_with("REG-"));

        let found = repo.find_by_code(&p.registration_code).await.unwrap().unwrap();
        assert_eq!(found.id, p.id);
        assert!(repo.find_by_code("REG-MISSING").await.unwrap().is_none());
    }
}

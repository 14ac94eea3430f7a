//! SQLite-backed certificate templates and issued certificates

use crate::domain::certificates::{Certificate, CertificateTemplate, TextPlacement};
use crate::shared::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct TemplateRow {
    id: String,
    event_id: String,
    background_url: String,
    width: i64,
    height: i64,
    placements: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TemplateRow {
    fn into_domain(self) -> AppResult<CertificateTemplate> {
        let placements: Vec<TextPlacement> = serde_json::from_str(&self.placements)?;
        Ok(CertificateTemplate {
            id: self.id,
            event_id: self.event_id,
            background_url: self.background_url,
            width: self.width as u32,
            height: self.height as u32,
            placements,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CertificateRow {
    id: String,
    event_id: String,
    participant_id: String,
    serial: String,
    issued_at: DateTime<Utc>,
}

impl CertificateRow {
    fn into_domain(self) -> Certificate {
        Certificate {
            id: self.id,
            event_id: self.event_id,
            participant_id: self.participant_id,
            serial: self.serial,
            issued_at: self.issued_at,
        }
    }
}

/// Repository for certificate templates and issued certificates
#[derive(Clone)]
pub struct CertificatesRepository {
    pool: SqlitePool,
}

impl CertificatesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace the template for an event (one template per event)
    pub async fn upsert_template(&self, template: &CertificateTemplate) -> AppResult<()> {
        let placements = serde_json::to_string(&template.placements)?;
        sqlx::query(
            "INSERT INTO certificate_templates (id, event_id, background_url, width, height, \
             placements, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(event_id) DO UPDATE SET background_url = excluded.background_url, \
             width = excluded.width, height = excluded.height, \
             placements = excluded.placements, updated_at = excluded.updated_at",
        )
        .bind(&template.id)
        .bind(&template.event_id)
        .bind(&template.background_url)
        .bind(template.width as i64)
        .bind(template.height as i64)
        .bind(placements)
        .bind(template.created_at)
        .bind(template.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_template(&self, event_id: &str) -> AppResult<Option<CertificateTemplate>> {
        let row = sqlx::query_as::<_, TemplateRow>(
            "SELECT id, event_id, background_url, width, height, placements, created_at, \
             updated_at FROM certificate_templates WHERE event_id = ?",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(TemplateRow::into_domain).transpose()
    }

    /// Insert a certificate unless the participant already holds one for the
    /// event. Returns whether a row was inserted.
    pub async fn insert_if_absent(&self, certificate: &Certificate) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO certificates (id, event_id, participant_id, serial, issued_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(event_id, participant_id) DO NOTHING",
        )
        .bind(&certificate.id)
        .bind(&certificate.event_id)
        .bind(&certificate.participant_id)
        .bind(&certificate.serial)
        .bind(certificate.issued_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            // serial collision, distinct from the benign participant conflict
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                format!("certificate serial already exists: {}", certificate.serial),
            )),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn find_for_participant(
        &self,
        event_id: &str,
        participant_id: &str,
    ) -> AppResult<Option<Certificate>> {
        let row = sqlx::query_as::<_, CertificateRow>(
            "SELECT id, event_id, participant_id, serial, issued_at FROM certificates \
             WHERE event_id = ? AND participant_id = ?",
        )
        .bind(event_id)
        .bind(participant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(CertificateRow::into_domain))
    }

    pub async fn count_for_event(&self, event_id: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM certificates WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::certificates::{PlacementField, TextAlign};
    use crate::domain::events::{Event, EventStatus};
    use crate::infrastructure::adapters::database::connect_in_memory;
    use crate::infrastructure::adapters::events_repository::EventsRepository;
    use chrono::Duration;
    use uuid::Uuid;

    async fn seed_event(pool: &SqlitePool) -> String {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4().to_string(),
            slug: "cert-event".into(),
            title: "Cert".into(),
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

    fn sample_template(event_id: &str) -> CertificateTemplate {
        let now = Utc::now();
        CertificateTemplate {
            id: Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            background_url: "https://cdn.example.com/bg.png".into(),
            width: 1280,
            height: 905,
            placements: vec![TextPlacement {
                field: PlacementField::ParticipantName,
                x: 640,
                y: 420,
                font_size: 36,
                color: "#1a1a1a".into(),
                align: TextAlign::Center,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_template_upsert_replaces_placements() {
        let pool = connect_in_memory().await.unwrap();
        let event_id = seed_event(&pool).await;
        let repo = CertificatesRepository::new(pool);

        let mut template = sample_template(&event_id);
        repo.upsert_template(&template).await.unwrap();

        template.placements[0].x = 100;
        template.background_url = "https://cdn.example.com/bg2.png".into();
        repo.upsert_template(&template).await.unwrap();

        let stored = repo.find_template(&event_id).await.unwrap().unwrap();
        assert_eq!(stored.placements[0].x, 100);
        assert_eq!(stored.background_url, "https://cdn.example.com/bg2.png");
    }

    #[tokio::test]
    async fn test_certificate_insert_is_idempotent_per_participant() {
        let pool = connect_in_memory().await.unwrap();
        let event_id = seed_event(&pool).await;
        let repo = CertificatesRepository::new(pool);

        let cert = Certificate {
            id: Uuid::new_v4().to_string(),
            event_id: event_id.clone(),
            participant_id: "p_1".into(),
            serial: "CERT-0001".into(),
            issued_at: Utc::now(),
        };
        assert!(repo.insert_if_absent(&cert).await.unwrap());

        let again = Certificate {
            id: Uuid::new_v4().to_string(),
            serial: "CERT-0002".into(),
            ..cert.clone()
        };
        assert!(!repo.insert_if_absent(&again).await.unwrap());
        assert_eq!(repo.count_for_event(&event_id).await.unwrap(), 1);
    }
}

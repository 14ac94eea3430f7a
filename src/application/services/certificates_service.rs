//! Certificate service: templates, bulk issuance and rendering

use crate::application::services::metrics_service::MetricsService;
use crate::domain::certificates::{Certificate, CertificateTemplate, TextPlacement};
use crate::infrastructure::adapters::{
    AttendanceRepository, CertificateRenderer, CertificatesRepository, EventsRepository,
    ParticipantsRepository,
};
use crate::shared::error::{AppError, AppResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Template upsert request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TemplateUpsertRequest {
    #[validate(url)]
    pub background_url: String,

    #[validate(range(min = 100, max = 10000))]
    pub width: u32,

    #[validate(range(min = 100, max = 10000))]
    pub height: u32,

    #[validate(length(min = 1, max = 32))]
    pub placements: Vec<TextPlacement>,
}

/// Result of a bulk issuance run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueSummary {
    pub issued: u64,
    pub skipped: u64,
}

pub struct CertificatesService {
    certificates: Arc<CertificatesRepository>,
    participants: Arc<ParticipantsRepository>,
    attendance: Arc<AttendanceRepository>,
    events: Arc<EventsRepository>,
    metrics: Arc<MetricsService>,
}

impl CertificatesService {
    pub fn new(
        certificates: Arc<CertificatesRepository>,
        participants: Arc<ParticipantsRepository>,
        attendance: Arc<AttendanceRepository>,
        events: Arc<EventsRepository>,
        metrics: Arc<MetricsService>,
    ) -> Self {
        Self {
            certificates,
            participants,
            attendance,
            events,
            metrics,
        }
    }

    fn serial_prefix(event_id: &str) -> String {
        let compact: String = event_id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(8)
            .collect();
        compact.to_uppercase()
    }

    /// Store or replace the template for an event (admin)
    pub async fn upsert_template(
        &self,
        event_id: &str,
        request: TemplateUpsertRequest,
    ) -> AppResult<CertificateTemplate> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;

        let now = Utc::now();
        let template = CertificateTemplate {
            id: Uuid::new_v4().to_string(),
            event_id: event.id,
            background_url: request.background_url,
            width: request.width,
            height: request.height,
            placements: request.placements,
            created_at: now,
            updated_at: now,
        };
        self.certificates.upsert_template(&template).await?;
        Ok(template)
    }

    pub async fn get_template(&self, event_id: &str) -> AppResult<CertificateTemplate> {
        self.certificates
            .find_template(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("certificate template".into()))
    }

    /// Issue certificates for every checked-in participant of an event,
    /// skipping those who already hold one (admin)
    pub async fn issue_for_event(&self, event_id: &str) -> AppResult<IssueSummary> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;

        if self.certificates.find_template(&event.id).await?.is_none() {
            return Err(AppError::Validation(
                "no certificate template configured for this event".into(),
            ));
        }

        let records = self.attendance.list_for_event(&event.id).await?;
        let prefix = Self::serial_prefix(&event.id);
        let mut next = self.certificates.count_for_event(&event.id).await? + 1;
        let mut issued = 0u64;
        let mut skipped = 0u64;

        for record in records {
            let certificate = Certificate {
                id: Uuid::new_v4().to_string(),
                event_id: event.id.clone(),
                participant_id: record.participant_id.clone(),
                serial: format!("CERT-{}-{:04}", prefix, next),
                issued_at: Utc::now(),
            };
            if self.certificates.insert_if_absent(&certificate).await? {
                issued += 1;
                next += 1;
            } else {
                skipped += 1;
            }
        }

        self.metrics.record_certificates_issued(issued);
        info!(event_id = %event.id, issued = issued, skipped = skipped, "Certificate issuance run");
        Ok(IssueSummary { issued, skipped })
    }

    /// Render the certificate document for a registration code
    pub async fn render_for_code(&self, registration_code: &str) -> AppResult<String> {
        let participant = self
            .participants
            .find_by_code(registration_code)
            .await?
            .ok_or_else(|| AppError::NotFound("registration".into()))?;

        let certificate = self
            .certificates
            .find_for_participant(&participant.event_id, &participant.id)
            .await?
            .ok_or_else(|| AppError::NotFound("certificate".into()))?;

        let template = self
            .certificates
            .find_template(&participant.event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("certificate template".into()))?;

        let event = self
            .events
            .find_by_id(&participant.event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("event".into()))?;

        CertificateRenderer::render(&template, &participant, &event, &certificate)
    }
}

//! Attendance service: check-in windows and self-service check-in

use crate::application::services::metrics_service::MetricsService;
use crate::config::AppConfig;
use crate::domain::attendance::{AttendanceRecord, AttendanceToken};
use crate::infrastructure::adapters::{
    AttendanceRepository, AttendanceStore, EventsRepository, ParticipantsRepository,
};
use crate::shared::error::{AppError, AppResult};
use std::sync::Arc;
use tracing::info;

pub struct AttendanceService {
    config: Arc<AppConfig>,
    store: Arc<AttendanceStore>,
    attendance: Arc<AttendanceRepository>,
    participants: Arc<ParticipantsRepository>,
    events: Arc<EventsRepository>,
    metrics: Arc<MetricsService>,
}

impl AttendanceService {
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<AttendanceStore>,
        attendance: Arc<AttendanceRepository>,
        participants: Arc<ParticipantsRepository>,
        events: Arc<EventsRepository>,
        metrics: Arc<MetricsService>,
    ) -> Self {
        Self {
            config,
            store,
            attendance,
            participants,
            events,
            metrics,
        }
    }

    /// Open a check-in window for an event (admin)
    pub async fn open_checkin(
        &self,
        event_id: &str,
        ttl_minutes: Option<u32>,
    ) -> AppResult<AttendanceToken> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;

        let ttl = ttl_minutes.unwrap_or(self.config.attendance.default_ttl_minutes);
        let token = self.store.issue(&event.id, ttl).await?;

        info!(event_id = %event.id, expires_at = %token.expires_at, "Check-in window opened");
        Ok(token)
    }

    /// Close a check-in window before its token expires (admin)
    pub async fn close_checkin(&self, token: &str) -> AppResult<()> {
        self.store.revoke(token).await
    }

    /// Self-service check-in with a live token and a registration code
    pub async fn check_in(
        &self,
        token: &str,
        registration_code: &str,
    ) -> AppResult<AttendanceRecord> {
        let token = self.store.validate(token).await?;

        let participant = self
            .participants
            .find_by_code(registration_code)
            .await?
            .ok_or_else(|| AppError::NotFound("registration".into()))?;

        if participant.event_id != token.event_id {
            return Err(AppError::Validation(
                "check-in token is for a different event".into(),
            ));
        }
        if !participant.can_check_in() {
            return Err(AppError::Validation(
                "registration is not confirmed".into(),
            ));
        }

        let record = self
            .attendance
            .insert(&participant.event_id, &participant.id)
            .await?;

        self.metrics.record_checkin();
        info!(
            event_id = %record.event_id,
            participant_id = %record.participant_id,
            "Participant checked in"
        );
        Ok(record)
    }
}

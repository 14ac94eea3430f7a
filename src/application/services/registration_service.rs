//! Registration service: free events register directly, paid events go
//! through a gateway checkout

use crate::application::services::metrics_service::MetricsService;
use crate::application::services::payments_service::{PaymentsService, Registrant};
use crate::domain::events::Event;
use crate::domain::participants::ParticipantStatus;
use crate::infrastructure::adapters::{
    AttendanceRepository, EventsRepository, Mailer, ParticipantsRepository,
    TransactionsRepository,
};
use crate::shared::error::{AppError, AppResult};
use crate::shared::validation::is_valid_email;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// Registration request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 3, max = 254))]
    pub email: String,

    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

/// Response for a registration attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub status: ParticipantStatus,
    /// Present once the registration is confirmed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_code: Option<String>,
    /// Present while payment is outstanding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Registration state for self-service lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationStatusResponse {
    pub registration_code: String,
    pub event_id: String,
    pub event_title: String,
    pub name: String,
    pub status: ParticipantStatus,
    pub checked_in: bool,
}

pub struct RegistrationService {
    events: Arc<EventsRepository>,
    participants: Arc<ParticipantsRepository>,
    transactions: Arc<TransactionsRepository>,
    attendance: Arc<AttendanceRepository>,
    payments: Arc<PaymentsService>,
    mailer: Arc<Mailer>,
    metrics: Arc<MetricsService>,
}

impl RegistrationService {
    pub fn new(
        events: Arc<EventsRepository>,
        participants: Arc<ParticipantsRepository>,
        transactions: Arc<TransactionsRepository>,
        attendance: Arc<AttendanceRepository>,
        payments: Arc<PaymentsService>,
        mailer: Arc<Mailer>,
        metrics: Arc<MetricsService>,
    ) -> Self {
        Self {
            events,
            participants,
            transactions,
            attendance,
            payments,
            mailer,
            metrics,
        }
    }

    async fn resolve_event(&self, event_ref: &str) -> AppResult<Event> {
        if let Some(event) = self.events.find_by_id(event_ref).await? {
            return Ok(event);
        }
        self.events
            .find_by_slug(event_ref)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("event {}", event_ref)))
    }

    /// Register for an event by id or slug
    pub async fn register(
        &self,
        event_ref: &str,
        request: RegistrationRequest,
    ) -> AppResult<RegistrationResponse> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if !is_valid_email(&request.email) {
            return Err(AppError::Validation("invalid email address".into()));
        }
        let email = request.email.trim().to_lowercase();

        let event = self.resolve_event(event_ref).await?;
        if !event.registration_open() {
            return Err(AppError::Validation("registration is closed".into()));
        }

        // one live registration per email and event
        if let Some(existing) = self
            .participants
            .find_by_event_and_email(&event.id, &email)
            .await?
        {
            if existing.status != ParticipantStatus::Cancelled {
                return Err(AppError::Conflict(
                    "email already registered for this event".into(),
                ));
            }
        }

        if event.has_capacity_limit() {
            let taken = self.events.count_taken_seats(&event.id).await?;
            if taken >= event.capacity {
                return Err(AppError::Validation("event is full".into()));
            }
        }

        if event.is_free() {
            let participant = self
                .participants
                .insert(
                    &event.id,
                    request.name.trim(),
                    &email,
                    request.phone.as_deref(),
                    ParticipantStatus::Registered,
                )
                .await?;

            self.metrics.record_registration();
            self.mailer
                .send_registration_confirmed(
                    &participant.email,
                    &participant.name,
                    &event.title,
                    &participant.registration_code,
                )
                .await;

            info!(
                event_id = %event.id,
                participant_id = %participant.id,
                "Free registration confirmed"
            );
            return Ok(RegistrationResponse {
                status: ParticipantStatus::Registered,
                registration_code: Some(participant.registration_code),
                transaction_id: None,
                checkout_url: None,
                amount_cents: None,
                currency: None,
            });
        }

        // a registrant retrying while their invoice is live gets the same
        // checkout back instead of a second invoice
        let transaction = match self
            .transactions
            .find_pending_for_registrant(&event.id, &email)
            .await?
        {
            Some(pending) if !pending.is_expired() => pending,
            _ => {
                let registrant = Registrant {
                    name: request.name.trim().to_string(),
                    email: email.clone(),
                    phone: request.phone.clone(),
                };
                let transaction = self.payments.create_checkout(&event, &registrant).await?;

                self.metrics.record_registration();
                self.mailer
                    .send_registration_pending(
                        &email,
                        &registrant.name,
                        &event.title,
                        &transaction.checkout_url,
                        transaction.amount_cents,
                        &transaction.currency,
                    )
                    .await;
                transaction
            }
        };

        Ok(RegistrationResponse {
            status: ParticipantStatus::PendingPayment,
            registration_code: None,
            transaction_id: Some(transaction.id.clone()),
            checkout_url: Some(transaction.checkout_url.clone()),
            amount_cents: Some(transaction.amount_cents),
            currency: Some(transaction.currency),
        })
    }

    /// Look up a registration by its code
    pub async fn lookup(&self, registration_code: &str) -> AppResult<RegistrationStatusResponse> {
        let participant = self
            .participants
            .find_by_code(registration_code)
            .await?
            .ok_or_else(|| AppError::NotFound("registration".into()))?;

        let event = self
            .events
            .find_by_id(&participant.event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("event".into()))?;

        let checked_in = self
            .attendance
            .has_attended(&participant.event_id, &participant.id)
            .await?;

        Ok(RegistrationStatusResponse {
            registration_code: participant.registration_code,
            event_id: participant.event_id,
            event_title: event.title,
            name: participant.name,
            status: participant.status,
            checked_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::events::EventStatus;
    use crate::infrastructure::adapters::database::connect_in_memory;
    use crate::infrastructure::adapters::payment_gateway::mock::MockGateway;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    struct Harness {
        service: RegistrationService,
        events: Arc<EventsRepository>,
    }

    async fn harness() -> Harness {
        let pool = connect_in_memory().await.unwrap();
        let config = Arc::new(AppConfig::default());
        let events = Arc::new(EventsRepository::new(pool.clone()));
        let participants = Arc::new(ParticipantsRepository::new(pool.clone()));
        let transactions = Arc::new(TransactionsRepository::new(pool.clone()));
        let attendance = Arc::new(AttendanceRepository::new(pool.clone()));
        let mailer = Arc::new(Mailer::new(config.email.clone()));
        let metrics = Arc::new(MetricsService::new().unwrap());

        let payments = Arc::new(PaymentsService::new(
            config.clone(),
            Arc::new(MockGateway::new()),
            transactions.clone(),
            participants.clone(),
            events.clone(),
            mailer.clone(),
            metrics.clone(),
        ));

        let service = RegistrationService::new(
            events.clone(),
            participants,
            transactions,
            attendance,
            payments,
            mailer,
            metrics,
        );
        Harness { service, events }
    }

    async fn seed_event(h: &Harness, price_cents: i64, capacity: i64) -> Event {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4().to_string(),
            slug: format!("event-{}", Uuid::new_v4().simple()),
            title: "Event".into(),
            description: "d".into(),
            venue: "v".into(),
            starts_at: now + Duration::days(1),
            ends_at: now + Duration::days(1) + Duration::hours(2),
            capacity,
            price_cents,
            currency: "USD".into(),
            status: EventStatus::Published,
            banner_url: None,
            created_at: now,
            updated_at: now,
        };
        h.events.insert(&event).await.unwrap();
        event
    }

    fn request(email: &str) -> RegistrationRequest {
        RegistrationRequest {
            name: "Ana".into(),
            email: email.into(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_free_event_registers_directly() {
        let h = harness().await;
        let event = seed_event(&h, 0, 0).await;

        let response = h
            .service
            .register(&event.id, request("ana@example.com"))
            .await
            .unwrap();
        assert_eq!(response.status, ParticipantStatus::Registered);
        assert!(response.registration_code.is_some());
        assert!(response.checkout_url.is_none());
    }

    #[tokio::test]
    async fn test_paid_event_returns_checkout() {
        let h = harness().await;
        let event = seed_event(&h, 5000, 0).await;

        let response = h
            .service
            .register(&event.slug, request("ana@example.com"))
            .await
            .unwrap();
        assert_eq!(response.status, ParticipantStatus::PendingPayment);
        assert!(response.registration_code.is_none());
        assert_eq!(response.amount_cents, Some(5000));
        let first_checkout = response.checkout_url.clone().unwrap();

        // retrying returns the same live checkout, no second invoice
        let retry = h
            .service
            .register(&event.slug, request("ana@example.com"))
            .await
            .unwrap();
        assert_eq!(retry.checkout_url.unwrap(), first_checkout);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let h = harness().await;
        let event = seed_event(&h, 0, 0).await;

        h.service
            .register(&event.id, request("ana@example.com"))
            .await
            .unwrap();
        let err = h
            .service
            .register(&event.id, request("ana@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_capacity_is_enforced() {
        let h = harness().await;
        let event = seed_event(&h, 0, 1).await;

        h.service
            .register(&event.id, request("first@example.com"))
            .await
            .unwrap();
        let err = h
            .service
            .register(&event.id, request("second@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unpublished_event_rejects_registration() {
        let h = harness().await;
        let mut event = seed_event(&h, 0, 0).await;
        event.status = EventStatus::Draft;
        h.events.update(&event).await.unwrap();

        let err = h
            .service
            .register(&event.id, request("ana@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let h = harness().await;
        let event = seed_event(&h, 0, 0).await;

        let err = h
            .service
            .register(&event.id, request("not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_lookup_reports_state() {
        let h = harness().await;
        let event = seed_event(&h, 0, 0).await;

        let response = h
            .service
            .register(&event.id, request("ana@example.com"))
            .await
            .unwrap();
        let code = response.registration_code.unwrap();

        let status = h.service.lookup(&code).await.unwrap();
        assert_eq!(status.status, ParticipantStatus::Registered);
        assert_eq!(status.event_id, event.id);
        assert!(!status.checked_in);

        let err = h.service.lookup("REG-GHOST").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

//! Certificate document renderer
//!
//! Stamps participant data onto the stored template: a background image plus
//! absolutely-positioned text nodes, one per placement rule.

use crate::domain::certificates::{Certificate, CertificateTemplate, PlacementField};
use crate::domain::events::Event;
use crate::domain::participants::Participant;
use crate::shared::error::{AppError, AppResult};
use askama::Template;

#[derive(Template)]
#[template(path = "certificate.html")]
struct CertificatePage<'a> {
    serial: &'a str,
    background_url: &'a str,
    width: u32,
    height: u32,
    placements: Vec<RenderedPlacement>,
}

struct RenderedPlacement {
    x: i32,
    y: i32,
    font_size: u32,
    color: String,
    align: &'static str,
    text: String,
}

/// Renders issued certificates as print-oriented HTML documents
pub struct CertificateRenderer;

impl CertificateRenderer {
    fn resolve_field(
        field: PlacementField,
        participant: &Participant,
        event: &Event,
        certificate: &Certificate,
    ) -> String {
        match field {
            PlacementField::ParticipantName => participant.name.clone(),
            PlacementField::EventTitle => event.title.clone(),
            PlacementField::EventDate => event.starts_at.format("%B %-d, %Y").to_string(),
            PlacementField::SerialNumber => certificate.serial.clone(),
        }
    }

    /// Produce the final HTML document
    pub fn render(
        template: &CertificateTemplate,
        participant: &Participant,
        event: &Event,
        certificate: &Certificate,
    ) -> AppResult<String> {
        let placements = template
            .placements
            .iter()
            .map(|p| RenderedPlacement {
                x: p.x,
                y: p.y,
                font_size: p.font_size,
                color: p.color.clone(),
                align: p.align.as_css(),
                text: Self::resolve_field(p.field, participant, event, certificate),
            })
            .collect();

        let page = CertificatePage {
            serial: &certificate.serial,
            background_url: &template.background_url,
            width: template.width,
            height: template.height,
            placements,
        };

        page.render()
            .map_err(|e| AppError::Internal(format!("certificate rendering failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::certificates::{TextAlign, TextPlacement};
    use crate::domain::events::EventStatus;
    use crate::domain::participants::ParticipantStatus;
    use chrono::{TimeZone, Utc};

    fn fixtures() -> (CertificateTemplate, Participant, Event, Certificate) {
        let issued = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        let template = CertificateTemplate {
            id: "tpl_1".into(),
            event_id: "ev_1".into(),
            background_url: "https://cdn.example.com/bg.png".into(),
            width: 1280,
            height: 905,
            placements: vec![
                TextPlacement {
                    field: PlacementField::ParticipantName,
                    x: 640,
                    y: 420,
                    font_size: 36,
                    color: "#1a1a1a".into(),
                    align: TextAlign::Center,
                },
                TextPlacement {
                    field: PlacementField::SerialNumber,
                    x: 1200,
                    y: 860,
                    font_size: 12,
                    color: "#555555".into(),
                    align: TextAlign::Right,
                },
            ],
            created_at: issued,
            updated_at: issued,
        };
        let participant = Participant {
            id: "p_1".into(),
            event_id: "ev_1".into(),
            name: "Ana Silva".into(),
            email: "ana@example.com".into(),
            phone: None,
            registration_code: "REG-1".into(),
            status: ParticipantStatus::Registered,
            created_at: issued,
            updated_at: issued,
        };
        let event = Event {
            id: "ev_1".into(),
            slug: "rust-conf".into(),
            title: "RustConf 2026".into(),
            description: "d".into(),
            venue: "v".into(),
            starts_at: issued,
            ends_at: issued,
            capacity: 0,
            price_cents: 0,
            currency: "USD".into(),
            status: EventStatus::Published,
            banner_url: None,
            created_at: issued,
            updated_at: issued,
        };
        let certificate = Certificate {
            id: "c_1".into(),
            event_id: "ev_1".into(),
            participant_id: "p_1".into(),
            serial: "CERT-EV1-0001".into(),
            issued_at: issued,
        };
        (template, participant, event, certificate)
    }

    #[test]
    fn test_render_stamps_all_placements() {
        let (template, participant, event, certificate) = fixtures();
        let html =
            CertificateRenderer::render(&template, &participant, &event, &certificate).unwrap();

        assert!(html.contains("Ana Silva"));
        assert!(html.contains("CERT-EV1-0001"));
        assert!(html.contains("left: 640px; top: 420px; font-size: 36px;"));
        assert!(html.contains("https://cdn.example.com/bg.png"));
        assert!(html.contains("width: 1280px"));
    }

    #[test]
    fn test_participant_text_is_escaped() {
        let (template, mut participant, event, certificate) = fixtures();
        participant.name = "<script>alert(1)</script>".into();
        let html =
            CertificateRenderer::render(&template, &participant, &event, &certificate).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}

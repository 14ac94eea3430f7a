//! Certificate domain models and types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Data field stamped onto the certificate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlacementField {
    ParticipantName,
    EventTitle,
    EventDate,
    SerialNumber,
}

impl PlacementField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementField::ParticipantName => "participant_name",
            PlacementField::EventTitle => "event_title",
            PlacementField::EventDate => "event_date",
            PlacementField::SerialNumber => "serial_number",
        }
    }
}

/// One named text-placement rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPlacement {
    pub field: PlacementField,
    /// Horizontal position in pixels from the left edge
    pub x: i32,
    /// Vertical position in pixels from the top edge
    pub y: i32,
    pub font_size: u32,
    /// CSS color value
    pub color: String,
    #[serde(default)]
    pub align: TextAlign,
}

/// Horizontal alignment of the placed text around its anchor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A stored background image plus placement rules for one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateTemplate {
    pub id: String,
    pub event_id: String,
    pub background_url: String,
    /// Page size in pixels
    pub width: u32,
    pub height: u32,
    pub placements: Vec<TextPlacement>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An issued certificate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub event_id: String,
    pub participant_id: String,
    pub serial: String,
    pub issued_at: DateTime<Utc>,
}

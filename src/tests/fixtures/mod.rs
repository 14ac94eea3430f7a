//! Request payload fixtures for route tests

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Event creation payload; published and free by default
pub fn event_payload(title: &str, price_cents: i64) -> serde_json::Value {
    let starts = Utc::now() + Duration::days(7);
    serde_json::json!({
        "title": title,
        "description": "An event for the route tests",
        "venue": "Main Hall",
        "starts_at": starts,
        "ends_at": starts + Duration::hours(3),
        "capacity": 0,
        "price_cents": price_cents,
        "status": "published"
    })
}

/// Registration payload
pub fn registration_payload(name: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "phone": "+15550100"
    })
}

/// Article creation payload
pub fn article_payload(title: &str, published: bool) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "body": "Body text",
        "author": "Staff",
        "published": published
    })
}

/// Certificate template payload with a single centered name placement
pub fn template_payload() -> serde_json::Value {
    serde_json::json!({
        "background_url": "https://cdn.example.com/bg.png",
        "width": 1280,
        "height": 905,
        "placements": [
            { "field": "participant_name", "x": 640, "y": 420,
              "font_size": 36, "color": "#1a1a1a", "align": "center" }
        ]
    })
}

/// Sign a webhook body the way the gateway does
pub fn sign_webhook(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("hmac key");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

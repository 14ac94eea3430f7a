//! Integration tests for the HTTP surface
//!
//! Each test drives the composed filter tree with warp's test client against
//! an in-memory database and the scripted mock gateway.

use crate::domain::payments::InvoiceStatus;
use crate::infrastructure::http::server::test_support::{create_test_server, TestServer};
use crate::tests::common::{assert_status, string_field};
use crate::tests::{config, fixtures};

async fn admin_token(ts: &TestServer) -> String {
    let routes = ts.server.create_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/auth/login")
        .json(&serde_json::json!({
            "username": ts.server.config().security.bootstrap_admin.username,
            "password": ts.server.config().security.bootstrap_admin.password,
        }))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    string_field(&body, "token")
}

async fn create_event(ts: &TestServer, token: &str, payload: &serde_json::Value) -> String {
    let routes = ts.server.create_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/admin/events")
        .header("authorization", format!("Bearer {}", token))
        .json(payload)
        .reply(&routes)
        .await;
    let body = assert_status(&response, 201);
    string_field(&body, "id")
}

async fn register(ts: &TestServer, event_id: &str, email: &str) -> serde_json::Value {
    let routes = ts.server.create_routes();
    let response = warp::test::request()
        .method("POST")
        .path(&format!("/events/{}/registrations", event_id))
        .json(&fixtures::registration_payload("Ana Silva", email))
        .reply(&routes)
        .await;
    assert_status(&response, 201)
}

#[tokio::test]
async fn test_health_endpoint() {
    config::init();
    let ts = create_test_server().await;
    let routes = ts.server.create_routes();

    let response = warp::test::request().path("/health").reply(&routes).await;
    let body = assert_status(&response, 200);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_counters() {
    config::init();
    let ts = create_test_server().await;
    let routes = ts.server.create_routes();

    // generate one request first
    warp::test::request().path("/events").reply(&routes).await;

    let response = warp::test::request().path("/metrics").reply(&routes).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = String::from_utf8_lossy(response.body()).to_string();
    assert!(body.contains("eventpass_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    config::init();
    let ts = create_test_server().await;
    let routes = ts.server.create_routes();

    let response = warp::test::request().path("/nope").reply(&routes).await;
    let body = assert_status(&response, 404);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_public_event_listing_hides_drafts() {
    config::init();
    let ts = create_test_server().await;
    let token = admin_token(&ts).await;

    let mut draft = fixtures::event_payload("Draft Event", 0);
    draft["status"] = serde_json::json!("draft");
    create_event(&ts, &token, &draft).await;
    create_event(&ts, &token, &fixtures::event_payload("Live Event", 0)).await;

    let routes = ts.server.create_routes();
    let response = warp::test::request().path("/events").reply(&routes).await;
    let body = assert_status(&response, 200);
    let events = body.as_array().expect("array body");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Live Event");

    // the admin listing sees both
    let response = warp::test::request()
        .path("/admin/events")
        .header("authorization", format!("Bearer {}", token))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body.as_array().expect("array body").len(), 2);
}

#[tokio::test]
async fn test_event_detail_by_slug() {
    config::init();
    let ts = create_test_server().await;
    let token = admin_token(&ts).await;
    create_event(&ts, &token, &fixtures::event_payload("Rust Meetup 2026", 0)).await;

    let routes = ts.server.create_routes();
    let response = warp::test::request()
        .path("/events/rust-meetup-2026")
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body["title"], "Rust Meetup 2026");
}

#[tokio::test]
async fn test_free_registration_and_lookup_flow() {
    config::init();
    let ts = create_test_server().await;
    let token = admin_token(&ts).await;
    let event_id = create_event(&ts, &token, &fixtures::event_payload("Free Event", 0)).await;

    let body = register(&ts, &event_id, "ana@example.com").await;
    assert_eq!(body["status"], "registered");
    let code = string_field(&body, "registration_code");

    let routes = ts.server.create_routes();
    let response = warp::test::request()
        .path(&format!("/registrations/{}", code))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body["event_id"], serde_json::json!(event_id));
    assert_eq!(body["checked_in"], false);

    // duplicate registration conflicts
    let response = warp::test::request()
        .method("POST")
        .path(&format!("/events/{}/registrations", event_id))
        .json(&fixtures::registration_payload("Ana Again", "ana@example.com"))
        .reply(&routes)
        .await;
    assert_status(&response, 409);
}

#[tokio::test]
async fn test_paid_registration_webhook_reconciliation_flow() {
    config::init();
    let ts = create_test_server().await;
    let token = admin_token(&ts).await;
    let event_id = create_event(&ts, &token, &fixtures::event_payload("Paid Event", 12000)).await;

    // registration opens a checkout
    let body = register(&ts, &event_id, "payer@example.com").await;
    assert_eq!(body["status"], "pending_payment");
    let transaction_id = string_field(&body, "transaction_id");
    assert!(string_field(&body, "checkout_url").starts_with("https://pay.mock.test/"));

    // still pending
    let routes = ts.server.create_routes();
    let response = warp::test::request()
        .path(&format!("/payments/{}/status", transaction_id))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body["status"], "pending");

    // signed webhook flips the transaction and creates the participant
    let invoice_id = "inv_mock_1";
    let payload = serde_json::json!({ "invoice_id": invoice_id, "status": "PAID" });
    let raw = serde_json::to_vec(&payload).unwrap();
    let signature = fixtures::sign_webhook(
        &ts.server.config().payments.webhook_secret,
        &raw,
    );
    let response = warp::test::request()
        .method("POST")
        .path("/payments/webhook")
        .header("x-callback-signature", signature.clone())
        .body(raw.clone())
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body["outcome"], "updated");

    // redelivery is a no-op
    let response = warp::test::request()
        .method("POST")
        .path("/payments/webhook")
        .header("x-callback-signature", signature)
        .body(raw)
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body["outcome"], "unchanged");

    let response = warp::test::request()
        .path(&format!("/payments/{}/status", transaction_id))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body["status"], "paid");

    // the participant is now visible to the admin
    let response = warp::test::request()
        .path(&format!("/admin/events/{}/participants", event_id))
        .header("authorization", format!("Bearer {}", token))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    let participants = body.as_array().expect("array body");
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["email"], "payer@example.com");
    assert_eq!(participants[0]["status"], "registered");
}

#[tokio::test]
async fn test_status_poll_reconciles_settled_invoice() {
    config::init();
    let ts = create_test_server().await;
    let token = admin_token(&ts).await;
    let event_id = create_event(&ts, &token, &fixtures::event_payload("Poll Event", 3000)).await;

    let body = register(&ts, &event_id, "poller@example.com").await;
    let transaction_id = string_field(&body, "transaction_id");

    ts.gateway.set_status("inv_mock_1", InvoiceStatus::Settled).await;

    let routes = ts.server.create_routes();
    let response = warp::test::request()
        .path(&format!("/payments/{}/status", transaction_id))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body["status"], "settled");
}

#[tokio::test]
async fn test_checkin_and_certificate_flow() {
    config::init();
    let ts = create_test_server().await;
    let token = admin_token(&ts).await;
    let event_id = create_event(&ts, &token, &fixtures::event_payload("Workshop", 0)).await;

    let body = register(&ts, &event_id, "ana@example.com").await;
    let code = string_field(&body, "registration_code");

    let routes = ts.server.create_routes();

    // open a check-in window
    let response = warp::test::request()
        .method("POST")
        .path(&format!("/admin/events/{}/checkin-token", event_id))
        .header("authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "ttl_minutes": 30 }))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 201);
    let checkin_token = string_field(&body, "token");

    // self-service check-in
    let response = warp::test::request()
        .method("POST")
        .path("/attendance/check-in")
        .json(&serde_json::json!({
            "token": checkin_token,
            "registration_code": code,
        }))
        .reply(&routes)
        .await;
    assert_status(&response, 201);

    // duplicate check-in conflicts
    let response = warp::test::request()
        .method("POST")
        .path("/attendance/check-in")
        .json(&serde_json::json!({
            "token": checkin_token,
            "registration_code": code,
        }))
        .reply(&routes)
        .await;
    assert_status(&response, 409);

    // template, issuance, rendering
    let response = warp::test::request()
        .method("PUT")
        .path(&format!("/admin/events/{}/certificate-template", event_id))
        .header("authorization", format!("Bearer {}", token))
        .json(&fixtures::template_payload())
        .reply(&routes)
        .await;
    assert_status(&response, 200);

    let response = warp::test::request()
        .method("POST")
        .path(&format!("/admin/events/{}/certificates", event_id))
        .header("authorization", format!("Bearer {}", token))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 201);
    assert_eq!(body["issued"], 1);

    let response = warp::test::request()
        .path(&format!("/certificates/{}", code))
        .reply(&routes)
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let html = String::from_utf8_lossy(response.body()).to_string();
    assert!(html.contains("Ana Silva"));
    assert!(html.contains("CERT-"));

    // lookup now reports the check-in
    let response = warp::test::request()
        .path(&format!("/registrations/{}", code))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body["checked_in"], true);
}

#[tokio::test]
async fn test_articles_and_testimonials_flow() {
    config::init();
    let ts = create_test_server().await;
    let token = admin_token(&ts).await;
    let routes = ts.server.create_routes();

    // draft article is hidden from the public listing
    let response = warp::test::request()
        .method("POST")
        .path("/admin/articles")
        .header("authorization", format!("Bearer {}", token))
        .json(&fixtures::article_payload("Hidden Draft", false))
        .reply(&routes)
        .await;
    assert_status(&response, 201);

    let response = warp::test::request()
        .method("POST")
        .path("/admin/articles")
        .header("authorization", format!("Bearer {}", token))
        .json(&fixtures::article_payload("Published Post", true))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 201);
    let slug = string_field(&body, "slug");

    let response = warp::test::request().path("/articles").reply(&routes).await;
    let body = assert_status(&response, 200);
    assert_eq!(body.as_array().expect("array body").len(), 1);

    let response = warp::test::request()
        .path(&format!("/articles/{}", slug))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body["title"], "Published Post");

    // testimonials go through moderation
    let response = warp::test::request()
        .method("POST")
        .path("/testimonials")
        .json(&serde_json::json!({
            "author_name": "Ana",
            "quote": "Great events!"
        }))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 201);
    let testimonial_id = string_field(&body, "id");

    let response = warp::test::request().path("/testimonials").reply(&routes).await;
    let body = assert_status(&response, 200);
    assert!(body.as_array().expect("array body").is_empty());

    let response = warp::test::request()
        .method("POST")
        .path(&format!("/admin/testimonials/{}/approve", testimonial_id))
        .header("authorization", format!("Bearer {}", token))
        .reply(&routes)
        .await;
    assert_status(&response, 200);

    let response = warp::test::request().path("/testimonials").reply(&routes).await;
    let body = assert_status(&response, 200);
    assert_eq!(body.as_array().expect("array body").len(), 1);
}

#[tokio::test]
async fn test_dashboard_aggregates() {
    config::init();
    let ts = create_test_server().await;
    let token = admin_token(&ts).await;
    let event_id = create_event(&ts, &token, &fixtures::event_payload("Money Maker", 5000)).await;

    register(&ts, &event_id, "payer@example.com").await;

    let payload = serde_json::json!({ "invoice_id": "inv_mock_1", "status": "SETTLED" });
    let raw = serde_json::to_vec(&payload).unwrap();
    let signature =
        fixtures::sign_webhook(&ts.server.config().payments.webhook_secret, &raw);
    let routes = ts.server.create_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/payments/webhook")
        .header("x-callback-signature", signature)
        .body(raw)
        .reply(&routes)
        .await;
    assert_status(&response, 200);

    let response = warp::test::request()
        .path("/admin/dashboard")
        .header("authorization", format!("Bearer {}", token))
        .reply(&routes)
        .await;
    let body = assert_status(&response, 200);
    assert_eq!(body["total_events"], 1);
    assert_eq!(body["total_participants"], 1);
    assert_eq!(body["revenue_cents"], 5000);
    assert_eq!(body["settled_transactions"], 1);
    assert_eq!(
        body["recent_transactions"].as_array().expect("array").len(),
        1
    );
}

#[tokio::test]
async fn test_invalid_body_is_bad_request() {
    config::init();
    let ts = create_test_server().await;
    let routes = ts.server.create_routes();

    let response = warp::test::request()
        .method("POST")
        .path("/testimonials")
        .body("{not json")
        .reply(&routes)
        .await;
    assert_status(&response, 400);
}

//! Authentication and signature checks on the HTTP surface

use crate::infrastructure::http::server::test_support::create_test_server;
use crate::tests::common::assert_status;
use crate::tests::{config, fixtures};

#[tokio::test]
async fn test_admin_routes_require_bearer_token() {
    config::init();
    let ts = create_test_server().await;
    let routes = ts.server.create_routes();

    for (method, path) in [
        ("GET", "/admin/events"),
        ("POST", "/admin/events"),
        ("GET", "/admin/dashboard"),
        ("POST", "/admin/articles"),
    ] {
        let response = warp::test::request()
            .method(method)
            .path(path)
            .json(&serde_json::json!({}))
            .reply(&routes)
            .await;
        assert_eq!(
            response.status().as_u16(),
            401,
            "{} {} must require auth",
            method,
            path
        );
    }
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    config::init();
    let ts = create_test_server().await;
    let routes = ts.server.create_routes();

    let response = warp::test::request()
        .path("/admin/dashboard")
        .header("authorization", "Bearer not.a.real.token")
        .reply(&routes)
        .await;
    assert_status(&response, 401);

    let response = warp::test::request()
        .path("/admin/dashboard")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .reply(&routes)
        .await;
    assert_status(&response, 401);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    config::init();
    let ts = create_test_server().await;
    let routes = ts.server.create_routes();

    let response = warp::test::request()
        .method("POST")
        .path("/auth/login")
        .json(&serde_json::json!({
            "username": "admin",
            "password": "definitely-wrong"
        }))
        .reply(&routes)
        .await;
    assert_status(&response, 401);
}

#[tokio::test]
async fn test_webhook_requires_valid_signature() {
    config::init();
    let ts = create_test_server().await;
    let routes = ts.server.create_routes();

    let payload = serde_json::json!({ "invoice_id": "inv_1", "status": "PAID" });
    let raw = serde_json::to_vec(&payload).unwrap();

    // missing signature
    let response = warp::test::request()
        .method("POST")
        .path("/payments/webhook")
        .body(raw.clone())
        .reply(&routes)
        .await;
    assert_status(&response, 401);

    // wrong signature
    let response = warp::test::request()
        .method("POST")
        .path("/payments/webhook")
        .header("x-callback-signature", "00".repeat(32))
        .body(raw.clone())
        .reply(&routes)
        .await;
    assert_status(&response, 401);

    // signature over a different body
    let other = fixtures::sign_webhook(
        &ts.server.config().payments.webhook_secret,
        b"tampered body",
    );
    let response = warp::test::request()
        .method("POST")
        .path("/payments/webhook")
        .header("x-callback-signature", other)
        .body(raw)
        .reply(&routes)
        .await;
    assert_status(&response, 401);
}

//! Shared assertions and helpers for route tests

use bytes::Bytes;
use warp::http::Response;

/// Parse a JSON response body
pub fn json_body(response: &Response<Bytes>) -> serde_json::Value {
    serde_json::from_slice(response.body()).unwrap_or_else(|e| {
        panic!(
            "response body is not JSON ({}): {:?}",
            e,
            String::from_utf8_lossy(response.body())
        )
    })
}

/// Assert a status code and return the parsed body
pub fn assert_status(response: &Response<Bytes>, expected: u16) -> serde_json::Value {
    assert_eq!(
        response.status().as_u16(),
        expected,
        "unexpected status, body: {}",
        String::from_utf8_lossy(response.body())
    );
    json_body(response)
}

/// Extract a string field from a JSON object
pub fn string_field(value: &serde_json::Value, field: &str) -> String {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| panic!("missing string field {} in {}", field, value))
        .to_string()
}

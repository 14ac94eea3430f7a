//! Test suite for EventPass Server
//!
//! Filter-level integration tests for the HTTP surface plus shared test
//! configuration, fixtures and assertions. Unit tests live next to the code
//! they cover.

pub mod common;
pub mod fixtures;
pub mod integration;
pub mod security;

/// Test configuration and utilities
pub mod config {
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize the test environment once per process
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("warn")
                .with_test_writer()
                .try_init();
        });
    }
}

//! EventPass Server - REST backend for an event-management and ticketing
//! platform
//!
//! Event listings, participant registration, gateway-backed payments with
//! webhook reconciliation, attendance tokens, certificate issuance, articles,
//! testimonials and an admin dashboard.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod middleware;
pub mod shared;

#[cfg(test)]
mod tests;

pub use config::AppConfig;
pub use infrastructure::http::HttpServer;
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;

//! HTTP infrastructure: models, handlers, routes and the server

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use server::HttpServer;

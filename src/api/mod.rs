//! API server module serving analytics over REST

pub mod cache;
pub mod handlers;
pub mod metrics;
pub mod redis_client;
pub mod routes;
pub mod server;
pub mod types;

pub use server::serve_api;

//! Shared building blocks for the gateway service.
//!
//! - `config`: environment-driven application configuration
//! - `errors`: caller-facing error taxonomy and its HTTP mapping
//! - `http_client`: the long-lived outbound HTTP client
//! - `middleware`: request ID propagation
//! - `models`: upstream payloads and normalized response shapes
//! - `response`: error envelope returned to callers

pub mod config;
pub mod errors;
pub mod http_client;
pub mod middleware;
pub mod models;
pub mod response;

pub use errors::{AppError, AppResult};
pub use http_client::{NetworkError, OutboundClient, UpstreamResponse};

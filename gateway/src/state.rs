//! Application state for gateway service.

use common::config::AppConfig;
use common::http_client::OutboundClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub http_client: OutboundClient,
}

impl AppState {
    /// Creates a new application state around an already-built outbound client.
    pub fn new(config: AppConfig, http_client: OutboundClient) -> Self {
        Self {
            config,
            http_client,
        }
    }
}

use std::sync::Arc;
use std::time::Duration;

use roadflow_core::{GraphStore, TrafficService};

use crate::config::ServerConfig;

/// Shared by every handler behind an `Arc`
#[derive(Debug)]
pub struct AppState {
    pub traffic: Arc<TrafficService>,
    /// Budget for one route search before it is cancelled
    pub route_timeout: Duration,
    pub request_timeout: Duration,
    pub concurrency_limit: usize,
}

impl AppState {
    pub fn new(traffic: Arc<TrafficService>, config: &ServerConfig) -> Self {
        Self {
            traffic,
            route_timeout: Duration::from_millis(config.route_timeout_ms),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
            concurrency_limit: config.concurrency_limit.max(1),
        }
    }

    pub fn store(&self) -> &Arc<GraphStore> {
        self.traffic.store()
    }
}

//! HTTP gateway for the `roadflow_core` routing engine.

pub mod api;
pub mod config;
pub mod state;
pub mod telemetry;

pub use api::build_router;
pub use config::{Cli, ServerConfig};
pub use state::AppState;

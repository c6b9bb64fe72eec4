//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g.
/// `ROADFLOW_LOG=roadflow_core=debug,tower_http=warn`
pub const LOG_ENV: &str = "ROADFLOW_LOG";
const DEFAULT_FILTER: &str = "roadflow=info,tower_http=info";

/// Installs the global subscriber. Records from the core crate's `log`
/// macros are bridged into it. Calling this more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .with(filter)
            .init();
    });
}

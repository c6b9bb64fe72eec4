use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use roadflow_core::{Error, TrafficService, load_store};
use roadflow_server::{AppState, Cli, ServerConfig, build_router, telemetry};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), Error> {
    let config = ServerConfig::resolve(cli)?;

    let store = Arc::new(load_store(&config.data, config.traffic)?);
    info!(
        junctions = store.junction_count(),
        roads = store.road_count(),
        "graph loaded"
    );
    let traffic = Arc::new(TrafficService::new(store, config.history));
    let app = build_router(Arc::new(AppState::new(traffic, &config)));

    let listener = TcpListener::bind(config.listen).await?;
    info!("listening on http://{}", config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

//! Server configuration: an optional TOML file, then command line overrides.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use roadflow_core::{DataConfig, Error, HistoryConfig, TrafficBounds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub route_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub concurrency_limit: usize,
    pub data: DataConfig,
    pub traffic: TrafficBounds,
    pub history: HistoryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            route_timeout_ms: 2_000,
            request_timeout_ms: 10_000,
            concurrency_limit: 512,
            data: DataConfig::default(),
            traffic: TrafficBounds::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        toml::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to read config '{}': {e}", path.display()),
            ))
        })?;
        Self::from_toml(&text)
    }

    /// Reads the file named by `--config`, if any, and applies the other flags
    /// on top.
    pub fn resolve(cli: &Cli) -> Result<Self, Error> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// The route search must time out before the whole request does, so
    /// slow searches are answered by the route handler.
    pub fn validate(&self) -> Result<(), Error> {
        if self.request_timeout_ms <= self.route_timeout_ms {
            return Err(Error::InvalidConfig(format!(
                "request_timeout_ms ({}) must exceed route_timeout_ms ({})",
                self.request_timeout_ms, self.route_timeout_ms
            )));
        }
        self.traffic.validate()
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(listen) = cli.listen {
            self.listen = listen;
        }
        if let Some(path) = &cli.junctions {
            self.data.junctions_path = path.clone();
        }
        if let Some(path) = &cli.roads {
            self.data.roads_path = path.clone();
        }
    }
}

/// Traffic-aware road routing server
#[derive(Debug, Default, Parser)]
#[command(version, about)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,
    /// Junctions JSON document
    #[arg(long)]
    pub junctions: Option<PathBuf>,
    /// Roads JSON document
    #[arg(long)]
    pub roads: Option<PathBuf>,
}

//! Traffic-aware shortest-path routing over a road network
//!
//! The [`GraphStore`] owns the network and publishes immutable snapshots of
//! its weights, the [`TrafficService`] is the only writer of traffic
//! multipliers and [`find_shortest_path`] answers queries on a snapshot.

pub mod config;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod store;
pub mod traffic;

/// Stable junction identifier taken from the load input
pub type JunctionId = i64;
/// Position of a road in the load input
pub type RoadId = usize;

pub use config::{DataConfig, HistoryConfig, TrafficBounds};
pub use error::Error;
pub use loading::load_store;
pub use model::{Junction, RoadSpec, Snapshot};
pub use routing::{CancelGuard, CancelToken, Route, RouteLeg, find_shortest_path};
pub use store::{GraphStore, RoadChange, UpdateReceipt};
pub use traffic::{TrafficService, TrafficUpdate};

//! Shortest-path routing over graph snapshots

mod cancel;
pub mod dijkstra;
mod route;

pub use cancel::{CancelGuard, CancelToken};
pub use dijkstra::find_shortest_path;
pub use route::{Route, RouteLeg};

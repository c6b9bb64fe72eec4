//! Data model for traffic-aware road routing
//!
//! Contains the road network topology and the versioned snapshots that
//! publish its current weights.

pub mod roads;
pub mod snapshot;

pub use roads::{Directory, Junction, Road, RoadArc, RoadGraph, RoadNetwork, RoadSpec};
pub use snapshot::Snapshot;

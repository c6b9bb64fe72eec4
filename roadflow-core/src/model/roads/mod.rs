//! Road network model

pub mod components;
pub mod directory;
pub mod network;

pub use components::{Junction, Road, RoadArc, RoadSpec};
pub use directory::Directory;
pub use network::{RoadGraph, RoadNetwork, pair_key};

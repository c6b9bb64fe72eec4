//! Road network components - junctions, roads and the arcs derived from them

use serde::{Deserialize, Serialize};

use crate::{JunctionId, RoadId};

/// Road network node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub id: JunctionId,
    pub name: String,
    /// Latitude in degrees, display only
    pub lat: f64,
    /// Longitude in degrees, display only
    pub lng: f64,
}

/// Road as it appears in the load input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSpec {
    pub from: JunctionId,
    pub to: JunctionId,
    /// Length in kilometres
    pub distance: f64,
    /// Free-flow travel time in minutes
    pub base_time: f64,
    #[serde(default = "default_bidirectional")]
    pub bidirectional: bool,
    /// Initial traffic multiplier, 1.0 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

fn default_bidirectional() -> bool {
    true
}

impl RoadSpec {
    pub fn new(from: JunctionId, to: JunctionId, distance: f64, base_time: f64) -> Self {
        Self {
            from,
            to,
            distance,
            base_time,
            bidirectional: true,
            multiplier: None,
        }
    }

    #[must_use]
    pub fn one_way(mut self) -> Self {
        self.bidirectional = false;
        self
    }
}

/// Validated road owned by the network. The traffic multiplier is not stored
/// here, it lives in the snapshot that publishes the current weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub id: RoadId,
    pub from: JunctionId,
    pub to: JunctionId,
    pub distance: f64,
    pub base_time: f64,
    pub bidirectional: bool,
}

impl Road {
    /// Whether this road joins the two junctions, in either direction.
    pub fn joins(&self, a: JunctionId, b: JunctionId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Directed arc of the adjacency. Both arcs of a bidirectional road point at
/// the same [`Road`], so they always share one multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadArc {
    pub road: RoadId,
    /// `true` when the arc runs from `Road::from` to `Road::to`
    pub forward: bool,
}

use serde::Serialize;

use crate::{JunctionId, RoadId};

/// One traversed arc of a route
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub road: RoadId,
    pub from: JunctionId,
    pub to: JunctionId,
    /// `false` when a two-way road is driven against its load direction
    pub forward: bool,
    /// Effective travel time in minutes
    pub travel_time: f64,
    /// Base distance in kilometres
    pub distance: f64,
}

/// Shortest route between two junctions on one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Junctions from source to destination, both inclusive
    pub junctions: Vec<JunctionId>,
    pub legs: Vec<RouteLeg>,
    /// Sum of effective travel times, minutes
    pub total_time: f64,
    /// Sum of base distances, kilometres
    pub total_distance: f64,
    /// Version of the snapshot the route was computed on
    pub version: u64,
}

impl Route {
    pub fn source(&self) -> JunctionId {
        self.junctions[0]
    }

    pub fn destination(&self) -> JunctionId {
        self.junctions[self.junctions.len() - 1]
    }
}

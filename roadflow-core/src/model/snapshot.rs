//! Point-in-time view of the road network and its traffic weights

use std::sync::Arc;

use super::roads::{Junction, Road, RoadNetwork};
use crate::{JunctionId, RoadId};

/// Immutable snapshot of the graph. The topology is shared with every other
/// snapshot of the same store; only the multipliers and the version differ.
#[derive(Debug, Clone)]
pub struct Snapshot {
    network: Arc<RoadNetwork>,
    multipliers: Vec<f64>,
    version: u64,
}

impl Snapshot {
    pub(crate) fn new(network: Arc<RoadNetwork>, multipliers: Vec<f64>, version: u64) -> Self {
        debug_assert_eq!(network.road_count(), multipliers.len());
        Self {
            network,
            multipliers,
            version,
        }
    }

    /// Derives the next version with a new set of multipliers.
    pub(crate) fn successor(&self, multipliers: Vec<f64>) -> Self {
        Self::new(Arc::clone(&self.network), multipliers, self.version + 1)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub(crate) fn shared_network(&self) -> &Arc<RoadNetwork> {
        &self.network
    }

    pub fn multipliers(&self) -> &[f64] {
        &self.multipliers
    }

    pub fn multiplier(&self, road: RoadId) -> f64 {
        self.multipliers[road]
    }

    /// Base travel time scaled by the current multiplier, in minutes
    pub fn effective_time(&self, road: RoadId) -> f64 {
        self.network.road(road).base_time * self.multipliers[road]
    }

    pub fn road(&self, road: RoadId) -> &Road {
        self.network.road(road)
    }

    pub fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.network.junction(id)
    }

    pub fn contains(&self, id: JunctionId) -> bool {
        self.network.contains(id)
    }

    pub fn junction_count(&self) -> usize {
        self.network.junction_count()
    }

    pub fn road_count(&self) -> usize {
        self.network.road_count()
    }
}

//! Versioned graph store
//!
//! The store publishes one immutable [`Snapshot`] at a time through an
//! [`ArcSwap`]. Readers load the current `Arc` without taking a lock and
//! traverse it freely. Writers are serialized by a store-wide mutation lock,
//! build the next snapshot from a copy of the multipliers and swap the
//! published pointer.

use std::sync::Arc;

use arc_swap::ArcSwap;
use log::{debug, info};
use parking_lot::Mutex;

use crate::model::{Junction, RoadNetwork, RoadSpec, Snapshot};
use crate::{Error, JunctionId, RoadId, TrafficBounds};

/// Multiplier change on one road
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadChange {
    pub road: RoadId,
    pub previous: f64,
    pub multiplier: f64,
    /// Travel time under the new multiplier, in minutes
    pub effective_time: f64,
}

/// Outcome of an accepted mutation
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReceipt {
    /// Version published by the mutation
    pub version: u64,
    pub changes: Vec<RoadChange>,
}

#[derive(Debug)]
pub struct GraphStore {
    current: ArcSwap<Snapshot>,
    writer: Mutex<()>,
    bounds: TrafficBounds,
}

impl GraphStore {
    /// Validates the input and publishes version 0.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] for unusable bounds, [`Error::InvalidTopology`]
    /// and [`Error::InvalidWeight`] for invalid junctions or roads.
    pub fn load(
        junctions: Vec<Junction>,
        roads: Vec<RoadSpec>,
        bounds: TrafficBounds,
    ) -> Result<Self, Error> {
        bounds.validate()?;
        let (network, multipliers) = RoadNetwork::build(junctions, roads, &bounds)?;
        info!(
            "Road network loaded: {} junctions, {} roads, {} arcs",
            network.junction_count(),
            network.road_count(),
            network.arc_count()
        );
        let snapshot = Snapshot::new(Arc::new(network), multipliers, 0);

        Ok(Self {
            current: ArcSwap::from_pointee(snapshot),
            writer: Mutex::new(()),
            bounds,
        })
    }

    /// Current published version of the graph
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    pub fn version(&self) -> u64 {
        self.current.load().version()
    }

    pub fn bounds(&self) -> TrafficBounds {
        self.bounds
    }

    pub fn junction_count(&self) -> usize {
        self.snapshot().junction_count()
    }

    pub fn road_count(&self) -> usize {
        self.snapshot().road_count()
    }

    /// Sets the multiplier of every road joining `from` and `to`, whichever
    /// way the road was loaded, in a single new version.
    ///
    /// # Errors
    ///
    /// [`Error::JunctionNotFound`], [`Error::SameJunction`],
    /// [`Error::RoadNotFound`] or [`Error::MultiplierOutOfRange`]. The graph
    /// is left untouched on error.
    pub fn apply_traffic_update(
        &self,
        from: JunctionId,
        to: JunctionId,
        multiplier: f64,
    ) -> Result<UpdateReceipt, Error> {
        // Topology never changes after load, so any snapshot can resolve ids.
        let network = Arc::clone(self.snapshot().shared_network());
        for id in [from, to] {
            if !network.contains(id) {
                return Err(Error::JunctionNotFound(id));
            }
        }
        if from == to {
            return Err(Error::SameJunction(from));
        }
        let roads = network.roads_between(from, to);
        if roads.is_empty() {
            return Err(Error::RoadNotFound { from, to });
        }
        self.bounds.check(multiplier)?;

        Ok(self.mutate(|multipliers| {
            roads
                .iter()
                .map(|&road| {
                    let previous = std::mem::replace(&mut multipliers[road], multiplier);
                    RoadChange {
                        road,
                        previous,
                        multiplier,
                        effective_time: network.road(road).base_time * multiplier,
                    }
                })
                .collect()
        }))
    }

    /// Restores every multiplier to 1.0 in a single new version. Only roads
    /// that were congested show up in the receipt.
    pub fn reset_traffic(&self) -> UpdateReceipt {
        let network = Arc::clone(self.snapshot().shared_network());
        self.mutate(|multipliers| {
            multipliers
                .iter_mut()
                .enumerate()
                .filter(|(_, multiplier)| **multiplier != 1.0)
                .map(|(road, multiplier)| {
                    let previous = std::mem::replace(multiplier, 1.0);
                    RoadChange {
                        road,
                        previous,
                        multiplier: 1.0,
                        effective_time: network.road(road).base_time,
                    }
                })
                .collect()
        })
    }

    /// Runs `edit` on a copy of the current multipliers under the mutation
    /// lock and publishes the result as the next version.
    fn mutate(&self, edit: impl FnOnce(&mut [f64]) -> Vec<RoadChange>) -> UpdateReceipt {
        let _guard = self.writer.lock();
        let current = self.snapshot();
        let mut multipliers = current.multipliers().to_vec();
        let changes = edit(&mut multipliers);
        let next = Arc::new(current.successor(multipliers));
        let version = next.version();
        self.current.store(next);
        debug!(
            "Published graph version {version} ({} road(s) changed)",
            changes.len()
        );

        UpdateReceipt { version, changes }
    }
}

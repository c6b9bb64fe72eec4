//! Traffic update service
//!
//! Validates congestion updates, publishes them through the [`GraphStore`]
//! and keeps a bounded log of what was applied.

pub mod history;

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use parking_lot::Mutex;
use serde::Deserialize;

pub use history::{
    RoadActivity, RoadHistory, RoadKey, SevereRoad, TrafficAnalytics, TrafficHistory,
    TrafficLogEntry,
};

use crate::store::{GraphStore, UpdateReceipt};
use crate::{Error, HistoryConfig, JunctionId};

/// Default threshold for [`TrafficService::severe_roads`]
pub const SEVERE_MULTIPLIER: f64 = 3.0;
/// Default number of entries returned by [`TrafficService::road_history`]
pub const HISTORY_LIMIT: usize = 10;
/// Default length of [`TrafficAnalytics::most_active`]
pub const TOP_ROADS: usize = 5;

/// Congestion update between two junctions. Direction does not matter:
/// every road joining the pair gets the new multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrafficUpdate {
    pub from: JunctionId,
    pub to: JunctionId,
    pub multiplier: f64,
}

#[derive(Debug)]
pub struct TrafficService {
    store: Arc<GraphStore>,
    history: Mutex<TrafficHistory>,
}

impl TrafficService {
    pub fn new(store: Arc<GraphStore>, config: HistoryConfig) -> Self {
        Self {
            store,
            history: Mutex::new(TrafficHistory::new(config.capacity)),
        }
    }

    pub fn store(&self) -> &Arc<GraphStore> {
        &self.store
    }

    /// Applies the update and logs it. The log lock is held across the
    /// publish so entries for a pair appear in version order.
    ///
    /// # Errors
    ///
    /// Any validation error from [`GraphStore::apply_traffic_update`]. Nothing
    /// is logged for rejected updates.
    pub fn update(&self, update: TrafficUpdate) -> Result<UpdateReceipt, Error> {
        let TrafficUpdate {
            from,
            to,
            multiplier,
        } = update;
        let mut history = self.history.lock();
        let receipt = self
            .store
            .apply_traffic_update(from, to, multiplier)
            .inspect_err(|e| warn!("Rejected traffic update {from} <-> {to} (x{multiplier}): {e}"))?;

        let effective_time = receipt
            .changes
            .iter()
            .map(|change| change.effective_time)
            .fold(f64::INFINITY, f64::min);
        history.record(
            from,
            to,
            TrafficLogEntry {
                timestamp: Utc::now(),
                multiplier,
                effective_time,
                version: receipt.version,
            },
        );
        info!(
            "Updated traffic {from} <-> {to} (x{multiplier}): {effective_time:.2} min, version {}",
            receipt.version
        );

        Ok(receipt)
    }

    /// Restores neutral traffic on every road. Each road that was congested
    /// gets a 1.0 entry in the log.
    pub fn reset(&self) -> UpdateReceipt {
        let mut history = self.history.lock();
        let receipt = self.store.reset_traffic();
        let snapshot = self.store.snapshot();
        let timestamp = Utc::now();
        for change in &receipt.changes {
            let road = snapshot.road(change.road);
            history.record(
                road.from,
                road.to,
                TrafficLogEntry {
                    timestamp,
                    multiplier: 1.0,
                    effective_time: change.effective_time,
                    version: receipt.version,
                },
            );
        }
        info!(
            "Traffic reset on {} road(s), version {}",
            receipt.changes.len(),
            receipt.version
        );
        receipt
    }

    pub fn road_history(&self, a: JunctionId, b: JunctionId, limit: usize) -> Option<RoadHistory> {
        self.history.lock().road_history(a, b, limit)
    }

    pub fn severe_roads(&self, threshold: f64) -> Vec<SevereRoad> {
        self.history.lock().severe_roads(threshold)
    }

    pub fn analytics(&self, top: usize) -> TrafficAnalytics {
        self.history.lock().analytics(top)
    }
}

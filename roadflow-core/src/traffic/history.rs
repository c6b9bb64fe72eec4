//! Log of accepted traffic updates, keyed by unordered junction pair

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::JunctionId;
use crate::model::roads::pair_key;

/// Unordered junction pair, smaller id first
pub type RoadKey = (JunctionId, JunctionId);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficLogEntry {
    pub timestamp: DateTime<Utc>,
    pub multiplier: f64,
    /// Fastest effective travel time between the pair after the update
    pub effective_time: f64,
    pub version: u64,
}

#[derive(Debug, Default)]
struct RoadLog {
    entries: VecDeque<TrafficLogEntry>,
    /// Updates ever recorded, including evicted ones
    total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadHistory {
    pub from: JunctionId,
    pub to: JunctionId,
    pub total_updates: usize,
    /// Most recent entries, oldest first
    pub entries: Vec<TrafficLogEntry>,
    /// Mean multiplier over the retained entries
    pub average_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SevereRoad {
    pub from: JunctionId,
    pub to: JunctionId,
    pub latest: TrafficLogEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadActivity {
    pub from: JunctionId,
    pub to: JunctionId,
    pub updates: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficAnalytics {
    pub roads_monitored: usize,
    pub total_updates: usize,
    pub average_updates_per_road: f64,
    pub most_active: Vec<RoadActivity>,
}

/// Bounded per-road history of traffic updates
#[derive(Debug)]
pub struct TrafficHistory {
    capacity: usize,
    roads: BTreeMap<RoadKey, RoadLog>,
}

impl TrafficHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            roads: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, a: JunctionId, b: JunctionId, entry: TrafficLogEntry) {
        let log = self.roads.entry(pair_key(a, b)).or_default();
        if log.entries.len() == self.capacity {
            log.entries.pop_front();
        }
        log.entries.push_back(entry);
        log.total += 1;
    }

    /// Last `limit` entries for the pair, `None` if it was never updated.
    pub fn road_history(&self, a: JunctionId, b: JunctionId, limit: usize) -> Option<RoadHistory> {
        let (from, to) = pair_key(a, b);
        let log = self.roads.get(&(from, to))?;
        let skip = log.entries.len().saturating_sub(limit);
        let average_multiplier =
            log.entries.iter().map(|e| e.multiplier).sum::<f64>() / log.entries.len() as f64;

        Some(RoadHistory {
            from,
            to,
            total_updates: log.total,
            entries: log.entries.iter().skip(skip).cloned().collect(),
            average_multiplier,
        })
    }

    /// Roads whose latest multiplier is at least `threshold`, heaviest first.
    pub fn severe_roads(&self, threshold: f64) -> Vec<SevereRoad> {
        let mut severe: Vec<SevereRoad> = self
            .roads
            .iter()
            .filter_map(|(&(from, to), log)| {
                log.entries
                    .back()
                    .filter(|latest| latest.multiplier >= threshold)
                    .map(|latest| SevereRoad {
                        from,
                        to,
                        latest: latest.clone(),
                    })
            })
            .collect();
        // BTreeMap order already sorts equal multipliers by key
        severe.sort_by(|a, b| b.latest.multiplier.total_cmp(&a.latest.multiplier));
        severe
    }

    pub fn analytics(&self, top: usize) -> TrafficAnalytics {
        let total_updates: usize = self.roads.values().map(|log| log.total).sum();
        let roads_monitored = self.roads.len();
        let average_updates_per_road = if roads_monitored == 0 {
            0.0
        } else {
            total_updates as f64 / roads_monitored as f64
        };

        let mut most_active: Vec<RoadActivity> = self
            .roads
            .iter()
            .map(|(&(from, to), log)| RoadActivity {
                from,
                to,
                updates: log.total,
            })
            .collect();
        // Stable sort keeps key order between equal counts
        most_active.sort_by(|a, b| b.updates.cmp(&a.updates));
        most_active.truncate(top);

        TrafficAnalytics {
            roads_monitored,
            total_updates,
            average_updates_per_road,
            most_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(multiplier: f64, version: u64) -> TrafficLogEntry {
        TrafficLogEntry {
            timestamp: Utc::now(),
            multiplier,
            effective_time: multiplier * 10.0,
            version,
        }
    }

    #[test]
    fn history_is_keyed_by_unordered_pair() {
        let mut history = TrafficHistory::new(10);
        history.record(3, 2, entry(2.0, 1));
        history.record(2, 3, entry(4.0, 2));

        let road = history.road_history(2, 3, 10).unwrap();
        assert_eq!((road.from, road.to), (2, 3));
        assert_eq!(road.total_updates, 2);
        assert_eq!(road.average_multiplier, 3.0);
        assert_eq!(history.road_history(3, 2, 10).unwrap(), road);
        assert!(history.road_history(1, 2, 10).is_none());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut history = TrafficHistory::new(3);
        for version in 1..=5 {
            history.record(1, 2, entry(version as f64, version));
        }
        let road = history.road_history(1, 2, 10).unwrap();
        assert_eq!(road.total_updates, 5);
        let versions: Vec<u64> = road.entries.iter().map(|e| e.version).collect();
        assert_eq!(versions, vec![3, 4, 5]);
        assert_eq!(road.average_multiplier, 4.0);

        let limited = history.road_history(1, 2, 2).unwrap();
        let versions: Vec<u64> = limited.entries.iter().map(|e| e.version).collect();
        assert_eq!(versions, vec![4, 5]);
    }

    #[test]
    fn severe_roads_follow_latest_level() {
        let mut history = TrafficHistory::new(10);
        history.record(1, 2, entry(4.0, 1));
        history.record(1, 2, entry(1.0, 2));
        history.record(2, 3, entry(3.0, 3));
        history.record(4, 5, entry(4.5, 4));

        let severe = history.severe_roads(3.0);
        let keys: Vec<RoadKey> = severe.iter().map(|r| (r.from, r.to)).collect();
        assert_eq!(keys, vec![(4, 5), (2, 3)]);
    }

    #[test]
    fn analytics_rank_busiest_roads() {
        let history = TrafficHistory::new(10);
        let empty = history.analytics(5);
        assert_eq!(empty.roads_monitored, 0);
        assert_eq!(empty.average_updates_per_road, 0.0);

        let mut history = history;
        for (a, b, times) in [(1, 2, 1), (2, 3, 3), (3, 4, 2), (4, 5, 3)] {
            for version in 0..times {
                history.record(a, b, entry(1.5, version));
            }
        }
        let analytics = history.analytics(2);
        assert_eq!(analytics.roads_monitored, 4);
        assert_eq!(analytics.total_updates, 9);
        assert_eq!(analytics.average_updates_per_road, 2.25);
        let top: Vec<RoadKey> = analytics.most_active.iter().map(|r| (r.from, r.to)).collect();
        assert_eq!(top, vec![(2, 3), (4, 5)]);
    }
}

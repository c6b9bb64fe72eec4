use roadflow_core::Junction;
use roadflow_core::prelude::{RoadHistory, SevereRoad, TrafficAnalytics};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
    pub junctions: usize,
    pub roads: usize,
    pub version: u64,
    /// Unix seconds
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct JunctionList {
    pub junctions: Vec<Junction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathFound {
    pub success: bool,
    pub path: Vec<Junction>,
    pub total_time: f64,
    pub estimated_distance: f64,
    pub version: u64,
}

#[derive(Debug, Serialize)]
pub struct TrafficApplied {
    pub success: bool,
    pub message: &'static str,
    pub version: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficReset {
    pub success: bool,
    pub message: &'static str,
    pub version: u64,
    pub roads_reset: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryFound {
    pub success: bool,
    /// `null` when the pair never received an update
    pub history: Option<RoadHistory>,
}

#[derive(Debug, Serialize)]
pub struct SevereList {
    pub success: bool,
    pub threshold: f64,
    pub roads: Vec<SevereRoad>,
}

#[derive(Debug, Serialize)]
pub struct Analytics {
    pub success: bool,
    #[serde(flatten)]
    pub analytics: TrafficAnalytics,
}

// Re-export key components
pub use crate::config::{DataConfig, HistoryConfig, TrafficBounds};
pub use crate::loading::load_store;
pub use crate::model::{Directory, Junction, Road, RoadNetwork, RoadSpec, Snapshot};
pub use crate::routing::{CancelGuard, CancelToken, Route, RouteLeg, find_shortest_path};
pub use crate::store::{GraphStore, RoadChange, UpdateReceipt};
pub use crate::traffic::{
    HISTORY_LIMIT, RoadActivity, RoadHistory, SEVERE_MULTIPLIER, SevereRoad, TOP_ROADS,
    TrafficAnalytics, TrafficLogEntry, TrafficService, TrafficUpdate,
};

// Core types
pub use crate::Error;
pub use crate::JunctionId;
pub use crate::RoadId;

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use chrono::Utc;
use roadflow_core::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ApiError;
use super::requests::{
    AnalyticsQuery, HistoryQuery, PathRequest, SearchQuery, SevereQuery, TrafficRequest,
};
use super::responses::{
    Analytics, Health, HistoryFound, JunctionList, PathFound, SevereList, TrafficApplied,
    TrafficReset,
};
use crate::state::AppState;

type Shared = State<Arc<AppState>>;

pub async fn health(State(state): Shared) -> Json<Health> {
    let snapshot = state.store().snapshot();
    Json(Health {
        status: "OK",
        message: "Server is running",
        junctions: snapshot.junction_count(),
        roads: snapshot.road_count(),
        version: snapshot.version(),
        timestamp: Utc::now().timestamp(),
    })
}

pub async fn junctions(State(state): Shared) -> Json<JunctionList> {
    let snapshot = state.store().snapshot();
    Json(JunctionList {
        junctions: snapshot.network().junctions().cloned().collect(),
    })
}

pub async fn junction(
    State(state): Shared,
    id: Result<Path<JunctionId>, PathRejection>,
) -> Result<Json<Junction>, ApiError> {
    let Path(id) = id?;
    state
        .store()
        .snapshot()
        .junction(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(Error::JunctionNotFound(id).to_string()))
}

pub async fn search_junctions(
    State(state): Shared,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<JunctionList>, ApiError> {
    let Query(query) = query?;
    let snapshot = state.store().snapshot();
    let network = snapshot.network();
    let ids: Vec<JunctionId> = match (query.name, query.prefix) {
        (Some(name), _) => network.directory().by_name(&name).into_iter().collect(),
        (None, Some(prefix)) => network.directory().search_prefix(&prefix),
        (None, None) => {
            return Err(ApiError::InvalidRequest(
                "Provide a 'name' or 'prefix' query parameter".into(),
            ));
        }
    };
    Ok(Json(JunctionList {
        junctions: ids
            .into_iter()
            .filter_map(|id| network.junction(id).cloned())
            .collect(),
    }))
}

/// Runs the search on the blocking pool. When the route timeout fires the
/// search is told to stop and the client gets a 408. The search is also
/// stopped if this future is dropped early, e.g. by the request timeout.
pub async fn shortest_path(
    State(state): Shared,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PathFound>, ApiError> {
    let Json(body) = body?;
    let PathRequest {
        source,
        destination,
    } = PathRequest::from_json(&body)?;

    let snapshot = state.store().snapshot();
    let cancel = CancelToken::new();
    let _cancel_on_drop = cancel.guard();
    let search = {
        let snapshot = Arc::clone(&snapshot);
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || {
            find_shortest_path(&snapshot, source, destination, &cancel)
        })
    };

    let route = match tokio::time::timeout(state.route_timeout, search).await {
        Ok(joined) => {
            joined.map_err(|e| ApiError::Internal(format!("route search task failed: {e}")))??
        }
        Err(_) => {
            warn!(
                source,
                destination,
                timeout_ms = state.route_timeout.as_millis() as u64,
                "route search timed out"
            );
            return Err(ApiError::Timeout);
        }
    };

    debug!(
        source,
        destination,
        hops = route.legs.len(),
        total_time = route.total_time,
        version = route.version,
        "route found"
    );
    Ok(Json(PathFound {
        success: true,
        path: route
            .junctions
            .iter()
            .filter_map(|&id| snapshot.junction(id).cloned())
            .collect(),
        total_time: route.total_time,
        estimated_distance: route.total_distance,
        version: route.version,
    }))
}

pub async fn update_traffic(
    State(state): Shared,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TrafficApplied>, ApiError> {
    let Json(body) = body?;
    let request = TrafficRequest::from_json(&body)?;
    let receipt = state.traffic.update(request.into())?;
    Ok(Json(TrafficApplied {
        success: true,
        message: "Traffic updated successfully",
        version: receipt.version,
    }))
}

pub async fn reset_traffic(State(state): Shared) -> Json<TrafficReset> {
    let receipt = state.traffic.reset();
    Json(TrafficReset {
        success: true,
        message: "All traffic reset",
        version: receipt.version,
        roads_reset: receipt.changes.len(),
    })
}

pub async fn traffic_history(
    State(state): Shared,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryFound>, ApiError> {
    let Query(query) = query?;
    let snapshot = state.store().snapshot();
    if let Some(&missing) = [query.from, query.to]
        .iter()
        .find(|&&id| !snapshot.contains(id))
    {
        return Err(Error::JunctionNotFound(missing).into());
    }
    let limit = query.limit.unwrap_or(HISTORY_LIMIT);
    Ok(Json(HistoryFound {
        success: true,
        history: state.traffic.road_history(query.from, query.to, limit),
    }))
}

pub async fn severe_roads(
    State(state): Shared,
    query: Result<Query<SevereQuery>, QueryRejection>,
) -> Result<Json<SevereList>, ApiError> {
    let Query(query) = query?;
    let threshold = query.threshold.unwrap_or(SEVERE_MULTIPLIER);
    if !threshold.is_finite() {
        return Err(ApiError::InvalidRequest(
            "Query parameter 'threshold' must be a finite number".into(),
        ));
    }
    Ok(Json(SevereList {
        success: true,
        threshold,
        roads: state.traffic.severe_roads(threshold),
    }))
}

pub async fn analytics(
    State(state): Shared,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Json<Analytics>, ApiError> {
    let Query(query) = query?;
    Ok(Json(Analytics {
        success: true,
        analytics: state.traffic.analytics(query.top.unwrap_or(TOP_ROADS)),
    }))
}

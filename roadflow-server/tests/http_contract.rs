use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use roadflow_core::prelude::*;
use roadflow_server::{AppState, ServerConfig, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn junction(id: JunctionId, name: &str) -> Junction {
    Junction {
        id,
        name: name.to_owned(),
        lat: 31.5 + id as f64 * 0.01,
        lng: 74.3 + id as f64 * 0.01,
    }
}

/// A(1) -> B(2) -> C(3) is 20 minutes, the direct A -> C road 30. D(4) is
/// isolated.
fn app() -> Router {
    let junctions = vec![
        junction(1, "Anarkali"),
        junction(2, "Badami Bagh"),
        junction(3, "Chauburji"),
        junction(4, "Data Darbar"),
    ];
    let roads = vec![
        RoadSpec::new(1, 2, 5.0, 10.0),
        RoadSpec::new(2, 3, 5.0, 10.0),
        RoadSpec::new(1, 3, 25.0, 30.0),
    ];
    let store = Arc::new(GraphStore::load(junctions, roads, TrafficBounds::default()).unwrap());
    let traffic = Arc::new(TrafficService::new(store, HistoryConfig::default()));
    build_router(Arc::new(AppState::new(traffic, &ServerConfig::default())))
}

/// `side` x `side` grid of two-way roads, served with the given timeouts.
/// A corner-to-corner search settles every junction.
fn grid_app(side: JunctionId, route_timeout: Duration, request_timeout: Duration) -> Router {
    let id = |row: JunctionId, col: JunctionId| row * side + col + 1;
    let mut junctions = Vec::new();
    let mut roads = Vec::new();
    for row in 0..side {
        for col in 0..side {
            junctions.push(Junction {
                id: id(row, col),
                name: format!("Grid {row}-{col}"),
                lat: 31.4 + row as f64 * 0.001,
                lng: 74.2 + col as f64 * 0.001,
            });
            if col + 1 < side {
                roads.push(RoadSpec::new(id(row, col), id(row, col + 1), 0.2, 1.0));
            }
            if row + 1 < side {
                roads.push(RoadSpec::new(id(row, col), id(row + 1, col), 0.2, 1.0));
            }
        }
    }
    let store = Arc::new(GraphStore::load(junctions, roads, TrafficBounds::default()).unwrap());
    let traffic = Arc::new(TrafficService::new(store, HistoryConfig::default()));
    build_router(Arc::new(AppState {
        traffic,
        route_timeout,
        request_timeout,
        concurrency_limit: 16,
    }))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn path_ids(body: &Value) -> Vec<i64> {
    body["path"]
        .as_array()
        .unwrap()
        .iter()
        .map(|junction| junction["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_reports_counts() {
    let app = app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Server is running");
    assert_eq!(body["junctions"], 4);
    assert_eq!(body["roads"], 3);
    assert_eq!(body["version"], 0);
    assert!(body["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn junctions_are_listed_in_load_order() {
    let app = app();
    let (status, body) = get(&app, "/junctions").await;
    assert_eq!(status, StatusCode::OK);
    let junctions = body["junctions"].as_array().unwrap();
    assert_eq!(junctions.len(), 4);
    assert_eq!(junctions[0]["id"], 1);
    assert_eq!(junctions[0]["name"], "Anarkali");
    assert!(junctions[3]["lat"].is_f64());
    assert!(junctions[3]["lng"].is_f64());
}

#[tokio::test]
async fn endpoints_are_served_under_api_prefix() {
    let app = app();
    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    let (_, body) = post(&app, "/api/path", json!({"source": 1, "destination": 3})).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn path_prefers_cheaper_detour() {
    let app = app();
    let (status, body) = post(&app, "/path", json!({"source": 1, "destination": 3})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(path_ids(&body), vec![1, 2, 3]);
    assert_eq!(body["totalTime"], 20.0);
    assert_eq!(body["estimatedDistance"], 10.0);
    assert_eq!(body["path"][1]["name"], "Badami Bagh");
}

#[tokio::test]
async fn traffic_update_reroutes() {
    let app = app();
    let (status, body) =
        post(&app, "/traffic", json!({"from": 1, "to": 2, "multiplier": 4.0})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Traffic updated successfully");
    assert_eq!(body["version"], 1);

    let (_, body) = post(&app, "/path", json!({"source": 1, "destination": 3})).await;
    assert_eq!(path_ids(&body), vec![1, 3]);
    assert_eq!(body["totalTime"], 30.0);
    assert_eq!(body["estimatedDistance"], 25.0);
    assert_eq!(body["version"], 1);
}

#[tokio::test]
async fn engine_errors_become_failure_envelopes() {
    let app = app();
    let cases = [
        ("/path", json!({"source": 1, "destination": 1}), "same junction"),
        ("/path", json!({"source": 1, "destination": 4}), "No path found"),
        ("/path", json!({"source": 1, "destination": 99}), "Junction 99 not found"),
        ("/traffic", json!({"from": 2, "to": 4, "multiplier": 2.0}), "No road connects"),
        ("/traffic", json!({"from": 1, "to": 2, "multiplier": 10.0}), "outside the allowed range"),
    ];
    for (uri, request, expected) in cases {
        let (status, body) = post(&app, uri, request).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        let message = body["message"].as_str().unwrap();
        assert!(message.contains(expected), "{message:?} lacks {expected:?}");
    }

    // Rejected updates never publish a version
    let (_, health) = get(&app, "/health").await;
    assert_eq!(health["version"], 0);
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    let app = app();
    let (status, body) = post(&app, "/path", json!({"source": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing field 'destination'");

    let (_, body) = post(&app, "/traffic", json!({"from": 1, "to": 2, "multiplier": "heavy"})).await;
    assert_eq!(body["success"], false);

    let request = Request::post("/path")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn string_ids_are_accepted() {
    let app = app();
    let (_, body) = post(&app, "/path", json!({"source": "1", "destination": "3"})).await;
    assert_eq!(body["success"], true);
    assert_eq!(path_ids(&body), vec![1, 2, 3]);
}

#[tokio::test]
async fn junction_lookup_and_search() {
    let app = app();
    let (status, body) = get(&app, "/junctions/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Badami Bagh");

    let (status, body) = get(&app, "/junctions/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (_, body) = get(&app, "/junctions/search?name=Chauburji").await;
    assert_eq!(body["junctions"][0]["id"], 3);

    let (_, body) = get(&app, "/junctions/search?prefix=Ba").await;
    assert_eq!(body["junctions"].as_array().unwrap().len(), 1);

    let (_, body) = get(&app, "/junctions/search").await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn traffic_history_severe_and_analytics() {
    let app = app();
    for multiplier in [2.0, 4.0] {
        post(&app, "/traffic", json!({"from": 2, "to": 1, "multiplier": multiplier})).await;
    }
    post(&app, "/traffic", json!({"from": 2, "to": 3, "multiplier": 1.5})).await;

    let (_, body) = get(&app, "/traffic/history?from=1&to=2").await;
    assert_eq!(body["success"], true);
    let history = &body["history"];
    assert_eq!(history["totalUpdates"], 2);
    assert_eq!(history["averageMultiplier"], 3.0);
    assert_eq!(history["entries"][1]["multiplier"], 4.0);
    assert_eq!(history["entries"][1]["effectiveTime"], 40.0);

    let (_, body) = get(&app, "/traffic/history?from=1&to=3").await;
    assert_eq!(body["success"], true);
    assert!(body["history"].is_null());

    let (_, body) = get(&app, "/traffic/history?from=1&to=77").await;
    assert_eq!(body["success"], false);

    let (_, body) = get(&app, "/traffic/severe").await;
    let severe = body["roads"].as_array().unwrap();
    assert_eq!(severe.len(), 1);
    assert_eq!((severe[0]["from"].as_i64(), severe[0]["to"].as_i64()), (Some(1), Some(2)));

    let (_, body) = get(&app, "/traffic/analytics").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["roadsMonitored"], 2);
    assert_eq!(body["totalUpdates"], 3);
    assert_eq!(body["mostActive"][0]["updates"], 2);
}

#[tokio::test]
async fn reset_restores_base_times() {
    let app = app();
    post(&app, "/traffic", json!({"from": 1, "to": 2, "multiplier": 4.0})).await;

    let (status, body) = post(&app, "/traffic/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["roadsReset"], 1);
    assert_eq!(body["version"], 2);

    let (_, body) = post(&app, "/path", json!({"source": 1, "destination": 3})).await;
    assert_eq!(path_ids(&body), vec![1, 2, 3]);
    assert_eq!(body["totalTime"], 20.0);
}

#[tokio::test]
async fn slow_search_answers_request_timeout() {
    let side = 200;
    let app = grid_app(side, Duration::ZERO, Duration::from_secs(30));
    let (status, body) =
        post(&app, "/path", json!({"source": 1, "destination": side * side})).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Request timed out");

    // Other endpoints are unaffected
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["junctions"], side * side);
}

#[tokio::test]
async fn request_deadline_maps_to_timeout_envelope() {
    let side = 200;
    let app = grid_app(side, Duration::from_secs(30), Duration::ZERO);
    let (status, body) =
        post(&app, "/api/path", json!({"source": 1, "destination": side * side})).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Request timed out");
}

//! Service-level tests: full JSON round trips through the router.

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use td_server::AppState;

fn app() -> Router {
    td_server::router(Arc::new(AppState::default()))
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Two junctions and three cars queued on the first — the FIFO smoke
/// scenario used across several tests.
fn fifo_fixture() -> (Value, Value) {
    let setup = json!({
        "junctions": [
            { "junction_id": "J1", "x": 0.0, "y": 0.0 },
            { "junction_id": "J2", "x": 10.0, "y": 10.0 }
        ]
    });
    let dispatch = json!({
        "algorithm_name": "fifo",
        "cars": [
            { "car_id": "A", "x": 2.0, "y": 0.0, "speed": 8.0, "next_junction_id": "J1" },
            { "car_id": "B", "x": 4.0, "y": 0.0, "speed": 8.0, "next_junction_id": "J1" },
            { "car_id": "C", "x": 6.0, "y": 0.0, "speed": 8.0, "next_junction_id": "J1" }
        ]
    });
    (setup, dispatch)
}

fn speeds(cars: &Value) -> Vec<f64> {
    cars.as_array()
        .unwrap()
        .iter()
        .map(|car| car["speed"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_check() {
    let app = app();
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn fifo_queue_decay_over_http() {
    let app = app();
    let (setup, dispatch) = fifo_fixture();

    let (status, body) = post(&app, "/setup", setup).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));

    let (status, cars) = post(&app, "/dispatch", dispatch).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(speeds(&cars), vec![8.0, 5.0, 2.0]);
}

#[tokio::test]
async fn unknown_algorithm_falls_back_to_fifo() {
    let app = app();
    let (setup, mut dispatch) = fifo_fixture();
    post(&app, "/setup", setup).await;

    dispatch["algorithm_name"] = json!("tsp");
    let (status, cars) = post(&app, "/dispatch", dispatch).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(speeds(&cars), vec![8.0, 5.0, 2.0]);
}

#[tokio::test]
async fn algorithm_name_aliases() {
    let app = app();
    let (setup, dispatch) = fifo_fixture();
    post(&app, "/setup", setup).await;

    for alias in ["alg", "algorithm", "alg_name"] {
        let mut request = dispatch.clone();
        request.as_object_mut().unwrap().remove("algorithm_name");
        request[alias] = json!("fifo");
        let (status, cars) = post(&app, "/dispatch", request).await;
        assert_eq!(status, StatusCode::OK, "alias {alias} rejected");
        assert_eq!(speeds(&cars), vec![8.0, 5.0, 2.0]);
    }
}

#[tokio::test]
async fn priority_single_lane_over_http() {
    let app = app();
    let (status, _) = post(
        &app,
        "/setup",
        json!({
            "junctions": [{
                "junction_id": "J",
                "x": 0.0,
                "y": 0.0,
                "junction_size": 2.0,
                "connected_roads_ids": ["approach"]
            }],
            "roads": [{
                "id": "approach",
                "polyline": [[0.0, 0.0], [0.0, -20.0]],
                "recommended_speed": 10.0
            }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let car = |id: &str, y: f64| {
        json!({
            "car_id": id, "x": 0.0, "y": y, "speed": 0.0,
            "rotation": FRAC_PI_2, "acceleration": 2.0, "breaking": 4.0
        })
    };
    let (status, cars) = post(
        &app,
        "/dispatch",
        json!({
            "algorithm_name": "priority",
            "next_request_in_seconds": 0.2,
            "cars": [car("lead", -1.6), car("second", -5.0), car("third", -15.0)]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let speeds = speeds(&cars);
    // Slowdown zone: 10 · 0.3 = 3 for the lead car, nobody behind exceeds it.
    assert_eq!(speeds[0], 3.0);
    for (i, &v) in speeds.iter().enumerate().skip(1) {
        assert!(v > 0.0 && v <= speeds[0], "car {i} got {v}");
    }
    // Resolution results travel back to the simulator.
    assert_eq!(cars[0]["road_id"], json!("approach"));
    assert_eq!(cars[0]["next_junction_id"], json!("J"));
}

#[tokio::test]
async fn cache_merge_adopts_stored_target() {
    let app = app();
    post(
        &app,
        "/setup",
        json!({
            "junctions": [{ "junction_id": "J1", "x": 0.0, "y": 0.0 }],
            "car_targets": { "A": "exit-road" }
        }),
    )
    .await;

    let (status, cars) = post(
        &app,
        "/dispatch",
        json!({
            "cars": [{
                "car_id": "A", "x": 2.0, "y": 0.0, "speed": 8.0,
                "next_junction_id": "J1", "seconds_in_traffic": 42.0
            }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cars[0]["target_road_id"], json!("exit-road"));
    // The cache is authoritative for accumulated waiting time.
    assert_eq!(cars[0]["seconds_in_traffic"], json!(0.0));
}

#[tokio::test]
async fn payload_junctions_are_a_fallback() {
    let app = app();
    let (_, mut dispatch) = fifo_fixture();
    dispatch["junctions"] = json!([{ "junction_id": "J1", "x": 0.0, "y": 0.0 }]);

    // No setup at all: the payload list carries the tick.
    let (status, cars) = post(&app, "/dispatch", dispatch).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(speeds(&cars), vec![8.0, 5.0, 2.0]);
}

#[tokio::test]
async fn no_junctions_anywhere_is_a_client_error() {
    let app = app();
    let (status, body) = post(&app, "/dispatch", json!({ "cars": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("junction"));
}

#[tokio::test]
async fn invalid_combine_mode_is_a_client_error() {
    let app = app();
    let (setup, mut dispatch) = fifo_fixture();
    post(&app, "/setup", setup).await;

    dispatch["combine_mode"] = json!("median");
    let (status, body) = post(&app, "/dispatch", dispatch).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("combine_mode"));
}

#[tokio::test]
async fn validation_rejects_bad_cars_and_roads() {
    let app = app();

    // Negative speed.
    let (status, _) = post(
        &app,
        "/dispatch",
        json!({
            "junctions": [{ "junction_id": "J1", "x": 0.0, "y": 0.0 }],
            "cars": [{ "car_id": "A", "x": 0.0, "y": 0.0, "speed": -1.0 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Single-point polyline dies in deserialization.
    let (status, _) = post(
        &app,
        "/setup",
        json!({
            "roads": [{ "id": "r", "polyline": [[0.0, 0.0]], "recommended_speed": 5.0 }]
        }),
    )
    .await;
    assert!(status.is_client_error());

    // Identifier over 64 bytes.
    let (status, _) = post(
        &app,
        "/setup",
        json!({
            "junctions": [{ "junction_id": "j".repeat(65), "x": 0.0, "y": 0.0 }]
        }),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn overwrite_setup_is_idempotent() {
    let app = app();
    let (setup, dispatch) = fifo_fixture();
    let mut overwrite = setup.clone();
    overwrite["overwrite"] = json!(true);

    post(&app, "/setup", overwrite.clone()).await;
    let (_, first) = post(&app, "/dispatch", dispatch.clone()).await;

    post(&app, "/setup", overwrite).await;
    let (_, second) = post(&app, "/dispatch", dispatch).await;

    assert_eq!(speeds(&first), speeds(&second));
}

#[tokio::test]
async fn append_setup_keeps_existing_junctions() {
    let app = app();
    post(
        &app,
        "/setup",
        json!({ "junctions": [{ "junction_id": "J1", "x": 0.0, "y": 0.0 }] }),
    )
    .await;
    post(
        &app,
        "/setup",
        json!({ "junctions": [{ "junction_id": "J2", "x": 10.0, "y": 10.0 }] }),
    )
    .await;

    // Cars queue on J1, which must have survived the second setup.
    let (_, dispatch) = fifo_fixture();
    let (status, cars) = post(&app, "/dispatch", dispatch).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(speeds(&cars), vec![8.0, 5.0, 2.0]);
}

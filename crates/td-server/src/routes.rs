//! Route handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{debug, info, warn};

use td_dispatch::{Algorithm, Car, CarCache, DispatchParams, resolve};
use td_topo::{Junction, RoadNetwork};

use crate::dto::{DispatchRequest, SetupRequest, SetupResponse, StatusResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/setup", post(setup))
        .route("/dispatch", post(dispatch))
        .with_state(state)
}

/// `GET /` — liveness probe.
async fn root() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// `POST /setup` — install or extend the topology and per-car cache.
async fn setup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetupRequest>,
) -> Result<Json<SetupResponse>, ApiError> {
    for junction in &payload.junctions {
        junction.validate()?;
    }
    for road in &payload.roads {
        road.validate()?;
    }

    let mut store = state.store.write();

    if payload.overwrite {
        store.junctions = payload.junctions;
        store.network = RoadNetwork::new(payload.roads);
        store.car_cache.clear();
    } else {
        store.junctions.extend(payload.junctions);
        store.network.add_roads(payload.roads);
    }

    for (car_id, road_id) in payload.car_targets {
        match store.car_cache.get_mut(&car_id) {
            Some(entry) => entry.target_road_id = Some(road_id),
            None => {
                store.car_cache.insert(
                    car_id.clone(),
                    CarCache {
                        car_id,
                        seconds_in_traffic: 0.0,
                        target_road_id: Some(road_id),
                    },
                );
            }
        }
    }

    store.slowdown_zone = payload.slowdown_zone;
    store.slowdown_rate = payload.slowdown_rate;

    info!(
        junctions = store.junctions.len(),
        roads = store.network.len(),
        cached_cars = store.car_cache.len(),
        "topology installed"
    );
    Ok(Json(SetupResponse { status: "success" }))
}

/// `POST /dispatch` — one tick: merge cache, resolve, arbitrate, reply with
/// revised speeds.
async fn dispatch(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DispatchRequest>,
) -> Result<Json<Vec<Car>>, ApiError> {
    let algorithm = Algorithm::from_name(&payload.algorithm_name);
    if !payload.algorithm_name.eq_ignore_ascii_case(algorithm.name()) {
        warn!(requested = %payload.algorithm_name, "unknown algorithm, falling back to fifo");
    }

    let mut params = DispatchParams::default();
    if let Some(mode) = &payload.combine_mode {
        params.combine_mode = mode.parse()?;
    }

    let mut cars = payload.cars;
    for car in &cars {
        car.validate()?;
    }
    for junction in &payload.junctions {
        junction.validate()?;
    }

    let store = state.store.read();
    params.slowdown_zone = store.slowdown_zone;
    params.slowdown_rate = store.slowdown_rate;

    // Stored junctions win; the payload list is a bootstrap fallback.
    let junctions: &[Junction] = if store.junctions.is_empty() {
        &payload.junctions
    } else {
        &store.junctions
    };
    if junctions.is_empty() {
        return Err(ApiError::NoJunctions);
    }

    for car in &mut cars {
        if let Some(cached) = store.car_cache.get(&car.car_id) {
            car.seconds_in_traffic = cached.seconds_in_traffic;
            if car.target_road_id.is_none() {
                car.target_road_id = cached.target_road_id.clone();
            }
        }
        resolve::set_current_road(car, &store.network);
        resolve::set_next_junction(car, &store.network, junctions);
    }

    algorithm.dispatch(
        &mut cars,
        junctions,
        &store.network,
        payload.next_request_in_seconds,
        &params,
    )?;

    debug!(
        algorithm = algorithm.name(),
        cars = cars.len(),
        dt = payload.next_request_in_seconds,
        "tick dispatched"
    );
    Ok(Json(cars))
}

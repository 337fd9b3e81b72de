//! Request and response shapes of the HTTP surface.
//!
//! The wire models themselves (`Car`, `Road`, `Junction`) live in the
//! library crates; this module only adds the envelopes around them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use td_core::{CarId, RoadId};
use td_dispatch::Car;
use td_topo::{Junction, Road};

use crate::state::{DEFAULT_SLOWDOWN_RATE, DEFAULT_SLOWDOWN_ZONE};

fn default_slowdown_zone() -> f64 {
    DEFAULT_SLOWDOWN_ZONE
}

fn default_slowdown_rate() -> f64 {
    DEFAULT_SLOWDOWN_RATE
}

fn default_algorithm_name() -> String {
    "fifo".to_owned()
}

fn default_tick_seconds() -> f64 {
    0.2
}

/// Body of `POST /setup`.
#[derive(Deserialize)]
pub struct SetupRequest {
    #[serde(default)]
    pub junctions: Vec<Junction>,

    #[serde(default)]
    pub roads: Vec<Road>,

    /// Per-car exit road, upserted into the car cache.
    #[serde(default)]
    pub car_targets: FxHashMap<CarId, RoadId>,

    /// Replace the stored topology and cache instead of appending.
    #[serde(default)]
    pub overwrite: bool,

    #[serde(default = "default_slowdown_zone")]
    pub slowdown_zone: f64,

    #[serde(default = "default_slowdown_rate")]
    pub slowdown_rate: f64,
}

#[derive(Serialize)]
pub struct SetupResponse {
    pub status: &'static str,
}

/// Body of `POST /dispatch`.
#[derive(Deserialize)]
pub struct DispatchRequest {
    /// Strategy name.  Several alias spellings are accepted to absorb
    /// caller-side drift; unknown names fall back to FIFO.
    #[serde(
        default = "default_algorithm_name",
        alias = "alg_name",
        alias = "algorithm",
        alias = "alg"
    )]
    pub algorithm_name: String,

    #[serde(default)]
    pub cars: Vec<Car>,

    /// Used only when the server has no stored junctions.
    #[serde(default)]
    pub junctions: Vec<Junction>,

    /// Tick duration Δt handed to the kinematic solver.
    #[serde(default = "default_tick_seconds")]
    pub next_request_in_seconds: f64,

    /// Optional override of the priority combine mode (`"sum"` | `"mult"`).
    #[serde(default)]
    pub combine_mode: Option<String>,
}

/// Body of `GET /`.
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

//! Process-wide shared state.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use td_core::CarId;
use td_dispatch::CarCache;
use td_topo::{Junction, RoadNetwork};

/// Stored default for the slowdown-zone radius, units.
pub const DEFAULT_SLOWDOWN_ZONE: f64 = 3.0;

/// Stored default for the slowdown multiplier.
pub const DEFAULT_SLOWDOWN_RATE: f64 = 0.3;

/// Everything the service remembers between requests: the topology, the
/// per-car cache, and the two tunables a setup call may override.
///
/// Nothing here survives a restart; the upstream simulator re-runs setup on
/// connect.
pub struct Store {
    pub junctions: Vec<Junction>,
    pub network: RoadNetwork,
    pub car_cache: FxHashMap<CarId, CarCache>,
    pub slowdown_zone: f64,
    pub slowdown_rate: f64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            junctions: Vec::new(),
            network: RoadNetwork::empty(),
            car_cache: FxHashMap::default(),
            slowdown_zone: DEFAULT_SLOWDOWN_ZONE,
            slowdown_rate: DEFAULT_SLOWDOWN_RATE,
        }
    }
}

/// Shared application state handed to every handler.
#[derive(Default)]
pub struct AppState {
    pub store: RwLock<Store>,
}

//! `td-dispatch` — per-tick dispatch algorithms for the rust_td service.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`car`]     | `Car` (wire model + tick-local handles), `CarCache`        |
//! | [`resolve`] | road / next-junction resolution at tick start              |
//! | [`score`]   | `priority_score`, `ScoreWeights`, `CombineMode`            |
//! | [`fifo`]    | legacy queue-decay strategy                                |
//! | [`priority`]| segment-aware admission + kinematic road following         |
//! | [`error`]   | `DispatchError`, `DispatchResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on the wire types.       |

use td_topo::{Junction, RoadNetwork};

pub mod car;
pub mod error;
pub mod fifo;
pub mod priority;
pub mod resolve;
pub mod score;


pub use car::{Car, CarCache};
pub use error::{DispatchError, DispatchResult};
pub use priority::DispatchParams;
pub use score::{CombineMode, ScoreWeights};

// ── Algorithm registry ────────────────────────────────────────────────────────

/// Named dispatch strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// Legacy queue-decay strategy and the fallback for unknown names.
    #[default]
    Fifo,
    /// Segment-aware priority admission.
    Priority,
}

impl Algorithm {
    /// Case-insensitive name lookup.  Unknown names fall back to FIFO; the
    /// wire contract is deliberately lenient here.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("priority") {
            Self::Priority
        } else {
            Self::Fifo
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Priority => "priority",
        }
    }

    /// Run one dispatch tick, mutating car speeds in place.
    pub fn dispatch(
        self,
        cars: &mut [Car],
        junctions: &[Junction],
        network: &RoadNetwork,
        duration_s: f64,
        params: &DispatchParams,
    ) -> DispatchResult<()> {
        match self {
            Self::Fifo => {
                fifo::dispatch(cars, junctions, params.speed_decay);
                Ok(())
            }
            Self::Priority => priority::dispatch(cars, junctions, network, duration_s, params),
        }
    }
}

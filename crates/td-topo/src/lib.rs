//! `td-topo` — road/junction topology and spatial resolution.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`road`]     | `Road`, endpoint projection by heading                    |
//! | [`junction`] | `Junction`, `RoadConnection`, ring segment arithmetic     |
//! | [`network`]  | `RoadNetwork` (roads + R-tree), point-to-road probes      |
//! | [`error`]    | `TopoError`, `TopoResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.         |

pub mod error;
pub mod junction;
pub mod network;
pub mod road;


pub use error::{TopoError, TopoResult};
pub use junction::{Junction, RoadConnection};
pub use network::{ROAD_PROBE_RADIUS, RoadNetwork};
pub use road::{Road, SEGMENT_BUFFER};

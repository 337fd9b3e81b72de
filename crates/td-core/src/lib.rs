//! `td-core` — foundational types for the `rust_td` traffic dispatch service.
//!
//! This crate is a dependency of every other `td-*` crate.  It intentionally
//! has no `td-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`ids`]        | `CarId`, `RoadId`, `JunctionId`, `LaneId`             |
//! | [`geom`]       | `Point`, `Polyline`, point-to-segment distance        |
//! | [`transform`]  | linear / logistic / exponential / logarithmic weights |
//! | [`kinematics`] | stopping distance, per-tick max target speed          |
//! | [`error`]      | `TdError`, `TdResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `td-server`.                                   |

pub mod error;
pub mod geom;
pub mod ids;
pub mod kinematics;
pub mod transform;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TdError, TdResult};
pub use geom::{Point, Polyline};
pub use ids::{CarId, JunctionId, LaneId, RoadId};

//! Road model and endpoint projection.

use std::f64::consts::{FRAC_PI_2, PI};

use td_core::geom::segment_distance;
use td_core::{JunctionId, Point, Polyline, RoadId, TdError, TdResult};

use crate::{TopoError, TopoResult};

/// How far a probe point may sit from a road segment and still count as on
/// it (GPS noise and simulator rounding).
pub const SEGMENT_BUFFER: f64 = 0.5;

/// A road: an undirected polyline path with an advisory speed limit and
/// optional junction endpoints.
///
/// When `junction_start_id` is set, the polyline's first vertex sits at that
/// junction; likewise `junction_end_id` for the last vertex.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Road {
    pub id: RoadId,

    pub polyline: Polyline,

    /// Advisory speed limit in units/second — the default speed cap for any
    /// car currently on this road.
    pub recommended_speed: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub junction_start_id: Option<JunctionId>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub junction_end_id: Option<JunctionId>,
}

impl Road {
    /// Range checks beyond what the field types already enforce.
    pub fn validate(&self) -> TdResult<()> {
        if !self.recommended_speed.is_finite() || self.recommended_speed < 0.0 {
            return Err(TdError::Validation(format!(
                "road {}: recommended_speed must be finite and non-negative",
                self.id
            )));
        }
        Ok(())
    }

    /// The road endpoint a car at `(x, y)` with the given heading (radians)
    /// is driving toward.
    ///
    /// Finds the polyline segment carrying the car (within
    /// [`SEGMENT_BUFFER`]), compares the heading against the segment
    /// direction, and returns the last vertex when the car faces downstream,
    /// the first otherwise.
    pub fn end_toward(&self, x: f64, y: f64, heading: f64) -> TopoResult<Point> {
        let p = Point::new(x, y);
        let segment = self
            .polyline
            .segments()
            .find(|&(a, b)| segment_distance(p, a, b) < SEGMENT_BUFFER);
        let Some((a, b)) = segment else {
            return Err(TopoError::OffSegment { x, y, road: self.id.clone() });
        };

        let segment_angle = (b.y - a.y).atan2(b.x - a.x);
        let delta = (heading - segment_angle + PI).rem_euclid(2.0 * PI) - PI;
        if delta.abs() < FRAC_PI_2 {
            Ok(self.polyline.last())
        } else {
            Ok(self.polyline.first())
        }
    }
}

//! Junction model: polygonal footprint, clockwise ring of connected roads,
//! and intra-junction pseudo-roads.

use td_core::{JunctionId, Point, RoadId, TdError, TdResult};

use crate::Road;

// ── RoadConnection ────────────────────────────────────────────────────────────

/// A pseudo-road traversing the junction interior, joining two outer roads.
///
/// The pair is undirected: `(a, b)` and `(b, a)` name the same connection.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadConnection {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub road: Road,

    pub road_a_id: RoadId,
    pub road_b_id: RoadId,
}

impl RoadConnection {
    /// `true` if this connection joins `a` and `b`, in either order.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.road_a_id.as_str() == a && self.road_b_id.as_str() == b)
            || (self.road_a_id.as_str() == b && self.road_b_id.as_str() == a)
    }
}

// ── Junction ──────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
fn default_junction_size() -> f64 {
    1.0
}

/// An intersection: a footprint polygon around a center point and the
/// clockwise ring of roads touching it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Junction {
    pub junction_id: JunctionId,

    pub x: f64,
    pub y: f64,

    /// Side length of the default square footprint.
    #[cfg_attr(feature = "serde", serde(default = "default_junction_size"))]
    pub junction_size: f64,

    /// Explicit convex footprint.  Absent on most payloads; the axis-aligned
    /// square `[x ± size/2, y ± size/2]` is used instead.
    #[cfg_attr(feature = "serde", serde(default))]
    pub polygon: Option<Vec<Point>>,

    /// Connected roads in clockwise order.  The ring order is load-bearing:
    /// it defines the segment arithmetic of
    /// [`crossing_segments_count`](Self::crossing_segments_count).
    #[cfg_attr(feature = "serde", serde(default))]
    pub connected_roads_ids: Vec<RoadId>,

    /// Pseudo-roads across the junction interior.
    #[cfg_attr(feature = "serde", serde(default))]
    pub road_connections: Vec<RoadConnection>,
}

impl Junction {
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// `true` iff `(x, y)` lies strictly inside the junction footprint.
    /// Boundary points count as outside.
    pub fn is_point_inside(&self, x: f64, y: f64) -> bool {
        match &self.polygon {
            Some(polygon) => point_in_polygon(x, y, polygon),
            None => {
                let half = self.junction_size / 2.0;
                (x - self.x).abs() < half && (y - self.y).abs() < half
            }
        }
    }

    /// The unique pseudo-road joining `road_a` and `road_b`, if declared.
    pub fn roads_connection(&self, road_a: &str, road_b: &str) -> Option<&RoadConnection> {
        self.road_connections.iter().find(|c| c.joins(road_a, road_b))
    }

    /// Number of rotational segments of the junction interior a car occupies
    /// when turning from `start_road` onto `target_road`.
    ///
    /// The ring splits the interior into `|ring|` cells, one per connected
    /// road.  Driving from the entry road clockwise to the exit road sweeps
    /// the cells between them, so a straight crossing occupies more cells
    /// than a tight turn.  Returns 0 when the ring is empty or either road
    /// is not on it.
    pub fn crossing_segments_count(&self, start_road: &str, target_road: &str) -> usize {
        if self.connected_roads_ids.is_empty() {
            return 0;
        }

        let mut start = None;
        let mut target = None;
        for (i, road_id) in self.connected_roads_ids.iter().enumerate() {
            if road_id.as_str() == start_road {
                start = Some(i);
            }
            if road_id.as_str() == target_road {
                target = Some(i);
            }
        }
        let (Some(s), Some(t)) = (start, target) else {
            return 0;
        };

        if t >= s { t - s } else { self.connected_roads_ids.len() - (s - t) }
    }

    /// Range checks beyond what the field types already enforce.
    pub fn validate(&self) -> TdResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(TdError::Validation(format!(
                "junction {}: center must be finite",
                self.junction_id
            )));
        }
        if !self.junction_size.is_finite() || self.junction_size < 0.0 {
            return Err(TdError::Validation(format!(
                "junction {}: junction_size must be finite and non-negative",
                self.junction_id
            )));
        }
        if let Some(polygon) = &self.polygon {
            if polygon.len() < 3 {
                return Err(TdError::Validation(format!(
                    "junction {}: polygon needs at least 3 points",
                    self.junction_id
                )));
            }
        }
        for connection in &self.road_connections {
            connection.road.validate()?;
        }
        Ok(())
    }
}

/// Even-odd ray cast.  Boundary hits are not specially handled; callers
/// treat the footprint as boundary-exclusive.
fn point_in_polygon(x: f64, y: f64, polygon: &[Point]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > y) != (pj.y > y) {
            let x_cross = pi.x + (y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

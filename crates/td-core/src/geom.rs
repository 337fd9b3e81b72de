//! Planar geometry primitives.
//!
//! Coordinates are `f64` in the arbitrary planar unit shared with the
//! upstream simulator (speeds are units/second).  The kinematic solver
//! subtracts near-equal distances, so single precision is not enough here.

use crate::{TdError, TdResult};

// ── Point ─────────────────────────────────────────────────────────────────────

/// A 2-D point.  Serializes as a bare `[x, y]` pair, the wire format used by
/// polylines and junction polygons.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance — cheaper than [`distance`](Self::distance)
    /// when only the relative order matters.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Distance from `p` to the segment `(a, b)`.
///
/// The projection parameter is clamped to the segment, so endpoints act as
/// the closest points beyond either end.  Degenerate segments (`a == b`)
/// fall back to plain point distance.
pub fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

// ── Polyline ──────────────────────────────────────────────────────────────────

/// An ordered, open polyline of at least two points.
///
/// This is the cached line-string form of a road geometry: projection and
/// distance queries walk its segments directly, no intermediate allocation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Point>", into = "Vec<Point>")
)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Validate and wrap a point sequence.  Fewer than two points is not a
    /// path and is rejected.
    pub fn new(points: Vec<Point>) -> TdResult<Self> {
        if points.len() < 2 {
            return Err(TdError::InvalidGeometry(format!(
                "polyline needs at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(Self(points))
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// First vertex (the `junction_start_id` end of a road).
    #[inline]
    pub fn first(&self) -> Point {
        self.0[0]
    }

    /// Last vertex (the `junction_end_id` end of a road).
    #[inline]
    pub fn last(&self) -> Point {
        self.0[self.0.len() - 1]
    }

    /// Iterator over consecutive segment endpoint pairs.
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Minimum distance from `p` to any segment.
    pub fn distance_to(&self, p: Point) -> f64 {
        self.segments()
            .map(|(a, b)| segment_distance(p, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Arc length from the first vertex to the point on the polyline closest
    /// to `p` — the projection query used for precise along-road distances.
    pub fn project(&self, p: Point) -> f64 {
        let mut walked = 0.0;
        let mut best_dist = f64::INFINITY;
        let mut best_arc = 0.0;
        for (a, b) in self.segments() {
            let seg_len = a.distance(b);
            let (dist, offset) = if seg_len == 0.0 {
                (p.distance(a), 0.0)
            } else {
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / (seg_len * seg_len))
                    .clamp(0.0, 1.0);
                let closest = Point::new(a.x + t * dx, a.y + t * dy);
                (p.distance(closest), t * seg_len)
            };
            if dist < best_dist {
                best_dist = dist;
                best_arc = walked + offset;
            }
            walked += seg_len;
        }
        best_arc
    }

    /// Axis-aligned envelope corners `(min, max)` for spatial-index loading.
    pub fn envelope(&self) -> (Point, Point) {
        let mut min = self.0[0];
        let mut max = self.0[0];
        for p in &self.0[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

impl TryFrom<Vec<Point>> for Polyline {
    type Error = TdError;
    fn try_from(points: Vec<Point>) -> TdResult<Self> {
        Self::new(points)
    }
}

impl From<Polyline> for Vec<Point> {
    fn from(line: Polyline) -> Self {
        line.0
    }
}

//! Road network collection and spatial index.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over road geometry envelopes.  A probe queries
//! the tree with the envelope of a circular buffer around the point, then
//! filters the candidates by exact polyline distance and keeps the closest
//! one.  The tree is bulk-loaded and rebuilt whenever roads are added —
//! topology mutations are rare relative to dispatch ticks, so rebuild cost
//! is irrelevant next to query cost.

use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use td_core::{Point, RoadId};

use crate::Road;

/// Probe radius used when resolving the road under a car.
pub const ROAD_PROBE_RADIUS: f64 = 1.0;

// ── R-tree road entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a road's envelope corners plus its index in
/// the roads vector.  Exact distances are computed against the polyline
/// after the envelope pass.
#[derive(Clone)]
struct RoadEntry {
    min: [f64; 2],
    max: [f64; 2],
    index: usize,
}

impl RTreeObject for RoadEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// All roads of the topology plus the spatial index over their geometries.
pub struct RoadNetwork {
    roads: Vec<Road>,
    index_by_id: FxHashMap<RoadId, usize>,
    tree: RTree<RoadEntry>,
}

impl RoadNetwork {
    /// Build a network from an initial road set.
    pub fn new(roads: Vec<Road>) -> Self {
        let mut network = Self {
            roads,
            index_by_id: FxHashMap::default(),
            tree: RTree::new(),
        };
        network.rebuild();
        network
    }

    /// A network with no roads.  Every probe misses.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Append one road and rebuild the index.
    pub fn add_road(&mut self, road: Road) {
        self.roads.push(road);
        self.rebuild();
    }

    /// Append several roads and rebuild the index once.
    pub fn add_roads(&mut self, roads: Vec<Road>) {
        self.roads.extend(roads);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.index_by_id = self
            .roads
            .iter()
            .enumerate()
            .map(|(i, road)| (road.id.clone(), i))
            .collect();

        let entries: Vec<RoadEntry> = self
            .roads
            .iter()
            .enumerate()
            .map(|(index, road)| {
                let (min, max) = road.polyline.envelope();
                RoadEntry { min: [min.x, min.y], max: [max.x, max.y], index }
            })
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    // ── Collection access ─────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Road at a resolved index.  Indices come from
    /// [`road_index_for_point`](Self::road_index_for_point) and stay valid
    /// until the next topology mutation.
    #[inline]
    pub fn road_at(&self, index: usize) -> &Road {
        &self.roads[index]
    }

    /// Look up a road by identifier.
    pub fn get(&self, id: &str) -> Option<&Road> {
        self.index_by_id.get(id).map(|&i| &self.roads[i])
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Index of the road carrying the point, if any lies within
    /// `buffer_radius` of it.
    ///
    /// Candidates come from an envelope query around the probe buffer; the
    /// winner is the candidate with the smallest exact polyline distance.
    /// Near a junction several roads fall inside the buffer and the closest
    /// one is the road the car is actually on.
    pub fn road_index_for_point(&self, x: f64, y: f64, buffer_radius: f64) -> Option<usize> {
        let probe = AABB::from_corners(
            [x - buffer_radius, y - buffer_radius],
            [x + buffer_radius, y + buffer_radius],
        );
        let p = Point::new(x, y);

        let mut best: Option<(usize, f64)> = None;
        for entry in self.tree.locate_in_envelope_intersecting(&probe) {
            let distance = self.roads[entry.index].polyline.distance_to(p);
            if distance > buffer_radius {
                continue;
            }
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((entry.index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Like [`road_index_for_point`](Self::road_index_for_point), returning
    /// the road itself.
    pub fn road_for_point(&self, x: f64, y: f64, buffer_radius: f64) -> Option<&Road> {
        self.road_index_for_point(x, y, buffer_radius)
            .map(|i| &self.roads[i])
    }
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self::empty()
    }
}

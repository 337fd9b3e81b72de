//! Car model and the long-lived per-car cache.

use std::f64::consts::PI;

use td_core::{CarId, JunctionId, LaneId, Point, RoadId, TdError, TdResult};
use td_topo::{Junction, Road};

/// Kinematic state of one car for one tick, as delivered by the simulator.
///
/// Cars are ephemeral: a fresh list arrives with every dispatch call and is
/// returned with revised speeds.  Long-lived per-car data lives in
/// [`CarCache`].  On the wire a car names its road and junction by id; the
/// resolved `road_idx` handle is tick-local and never serialized.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Car {
    pub car_id: CarId,

    pub x: f64,
    pub y: f64,

    /// Current speed in units/second.
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: f64,

    /// Steering angle, radians in `[0, 2π]`.  Carried through untouched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub wheel_rotation: f64,

    /// Geographic orientation, radians in `[0, 2π]` — the heading used to
    /// resolve which junction the car is driving toward.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation: f64,

    /// Acceleration capacity in units/second².
    #[cfg_attr(feature = "serde", serde(default))]
    pub acceleration: f64,

    /// Braking capacity in units/second².  The field name follows the
    /// simulator contract.
    #[cfg_attr(feature = "serde", serde(default))]
    pub breaking: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub next_junction_id: Option<JunctionId>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub lane_id: Option<LaneId>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub road_id: Option<RoadId>,

    /// Where the car wants to exit its next junction.  Supplied on first
    /// contact, served from the cache afterwards.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_road_id: Option<RoadId>,

    /// Accumulated waiting time in seconds, loaded from the cache.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seconds_in_traffic: f64,

    /// Index of the resolved current road in the topology arena —
    /// tick-local, never on the wire.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub road_idx: Option<usize>,
}

impl Car {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Squared airline distance to a junction center — enough for sorting.
    #[inline]
    pub fn sq_distance_to(&self, junction: &Junction) -> f64 {
        self.position().distance_sq(junction.center())
    }

    /// Airline distance to a junction center.
    #[inline]
    pub fn distance_to(&self, junction: &Junction) -> f64 {
        self.position().distance(junction.center())
    }

    /// Along-road distance to the junction: the car is projected onto the
    /// road geometry and measured against whichever end of the road the
    /// junction sits at.  More precise than the airline distance on curved
    /// roads.
    pub fn road_distance_to(&self, road: &Road, junction: &Junction) -> f64 {
        let line = &road.polyline;
        let car_arc = line.project(self.position());

        let center = junction.center();
        let start_gap = center.distance(line.first());
        let end_gap = center.distance(line.last());
        let junction_arc = if start_gap < end_gap { 0.0 } else { line.length() };

        (junction_arc - car_arc).abs()
    }

    /// Range checks beyond what the field types already enforce.
    pub fn validate(&self) -> TdResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(self.invalid("position must be finite"));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(self.invalid("speed must be finite and non-negative"));
        }
        if !self.acceleration.is_finite() || self.acceleration < 0.0 {
            return Err(self.invalid("acceleration must be finite and non-negative"));
        }
        if !self.breaking.is_finite() || self.breaking < 0.0 {
            return Err(self.invalid("breaking must be finite and non-negative"));
        }
        for (name, angle) in [("rotation", self.rotation), ("wheel_rotation", self.wheel_rotation)] {
            if !(0.0..=2.0 * PI).contains(&angle) {
                return Err(self.invalid(&format!("{name} must be within [0, 2π]")));
            }
        }
        Ok(())
    }

    fn invalid(&self, message: &str) -> TdError {
        TdError::Validation(format!("car {}: {message}", self.car_id))
    }
}

/// Long-lived per-car data, keyed by car id in the server store.
///
/// Populated through the setup interface and merged onto incoming cars at
/// the start of every dispatch tick.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarCache {
    pub car_id: CarId,

    #[cfg_attr(feature = "serde", serde(default))]
    pub seconds_in_traffic: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub target_road_id: Option<RoadId>,
}

//! Priority dispatch with segment-aware junction admission.
//!
//! Per tick and per junction:
//!
//! 1. **Occupancy** — cars already inside the junction footprint keep the
//!    speed they were admitted at; while any is present, nobody new enters.
//! 2. **Admission** — the first car of each approach road that has reached
//!    the stop line competes by priority score under segment exclusion:
//!    an admitted car leaves at its road's recommended speed, a refused car
//!    is stopped for the tick.
//! 3. **Road following** — every other car is given the highest speed the
//!    kinematic solver can justify against the gap to its leader and the
//!    (possibly slowdown-scaled) road limit.

use rustc_hash::{FxHashMap, FxHashSet};

use td_core::JunctionId;
use td_core::kinematics::max_target_speed;
use td_topo::{Junction, RoadNetwork};

use crate::fifo::DEFAULT_SPEED_DECAY;
use crate::score::{CombineMode, ScoreWeights, priority_score};
use crate::{Car, DispatchResult};

// ── DispatchParams ────────────────────────────────────────────────────────────

/// Caller-tunable knobs shared by both dispatch strategies.
#[derive(Copy, Clone)]
pub struct DispatchParams {
    /// FIFO only: speed given up per queue position.
    pub speed_decay: f64,

    /// Distance to the junction under which a car counts as at the stop
    /// line and competes for admission.
    pub junction_buffer_zone: f64,

    /// Distance under which the effective speed limit is scaled down.
    pub slowdown_zone: f64,

    /// Multiplier on the recommended speed inside the slowdown zone.
    pub slowdown_rate: f64,

    pub combine_mode: CombineMode,
    pub weights: ScoreWeights,
}

impl Default for DispatchParams {
    fn default() -> Self {
        Self {
            speed_decay: DEFAULT_SPEED_DECAY,
            junction_buffer_zone: 1.5,
            slowdown_zone: 3.0,
            slowdown_rate: 0.3,
            combine_mode: CombineMode::default(),
            weights: ScoreWeights::default(),
        }
    }
}

// ── Tick entry point ──────────────────────────────────────────────────────────

/// Run one priority tick over all junctions, mutating car speeds in place.
pub fn dispatch(
    cars: &mut [Car],
    junctions: &[Junction],
    network: &RoadNetwork,
    duration_s: f64,
    params: &DispatchParams,
) -> DispatchResult<()> {
    // Partition: cars clear of any junction per road, the rest per junction.
    let mut leaving: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
    let mut approaching: FxHashMap<JunctionId, Vec<usize>> = FxHashMap::default();
    for (i, car) in cars.iter().enumerate() {
        match &car.next_junction_id {
            Some(junction_id) => approaching.entry(junction_id.clone()).or_default().push(i),
            None => {
                if let Some(road_idx) = car.road_idx {
                    leaving.entry(road_idx).or_default().push(i);
                }
                // Neither a junction ahead nor a resolved road: lookup miss,
                // the car is not ours to steer this tick.
            }
        }
    }

    // Cars leaving a junction go straight back to the advisory limit.
    for (&road_idx, indices) in &leaving {
        let limit = network.road_at(road_idx).recommended_speed;
        for &i in indices {
            cars[i].speed = limit;
        }
    }

    for junction in junctions {
        let Some(at_junction) = approaching.get(junction.junction_id.as_str()) else {
            continue;
        };
        dispatch_junction(cars, junction, at_junction, network, duration_s, params)?;
    }
    Ok(())
}

// ── Per-junction pass ─────────────────────────────────────────────────────────

fn dispatch_junction(
    cars: &mut [Car],
    junction: &Junction,
    at_junction: &[usize],
    network: &RoadNetwork,
    duration_s: f64,
    params: &DispatchParams,
) -> DispatchResult<()> {
    // Bucket approaching cars by road; occupants freeze admission.
    let mut occupant_present = false;
    let mut per_road: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
    for &i in at_junction {
        let Some(road_idx) = cars[i].road_idx else {
            continue;
        };
        if junction.is_point_inside(cars[i].x, cars[i].y) {
            // Speed was set when the car was admitted on an earlier tick.
            occupant_present = true;
            continue;
        }
        per_road.entry(road_idx).or_default().push(i);
    }

    // Closest first on every road.
    for bucket in per_road.values_mut() {
        bucket.sort_by(|&a, &b| {
            cars[a]
                .distance_to(junction)
                .total_cmp(&cars[b].distance_to(junction))
        });
    }

    // Post-decision speed of each road's admission candidate.
    let mut decided: FxHashMap<usize, f64> = FxHashMap::default();
    if !occupant_present {
        admit_waiting_cars(cars, junction, &per_road, &mut decided, network, params);
        // The controller has spoken for these cars; the road-following pass
        // sees them only as leaders.
        for road_idx in decided.keys() {
            if let Some(bucket) = per_road.get_mut(road_idx) {
                bucket.remove(0);
            }
        }
    }

    // Road following: chase the car ahead as fast as safely possible.
    for (&road_idx, bucket) in &per_road {
        let road = network.road_at(road_idx);
        // (speed, distance-from-junction) of the car ahead, seeded by the
        // admission candidate when the road had one.
        let mut lead: Option<(f64, f64)> = decided.get(&road_idx).map(|&speed| (speed, 0.0));

        for &i in bucket {
            let distance = cars[i].distance_to(junction);
            match lead {
                // The car ahead is pulling away: no constraint, match it.
                Some((lead_speed, _)) if lead_speed > cars[i].speed => {
                    cars[i].speed = lead_speed;
                }
                _ => {
                    let lead_distance = lead.map_or(0.0, |(_, d)| d);
                    let limit = if distance <= params.slowdown_zone {
                        road.recommended_speed * params.slowdown_rate
                    } else {
                        road.recommended_speed
                    };
                    cars[i].speed = max_target_speed(
                        duration_s,
                        distance - lead_distance,
                        limit,
                        cars[i].speed,
                        cars[i].acceleration,
                        cars[i].breaking,
                    );
                }
            }
            lead = Some((cars[i].speed, distance));
        }
    }
    Ok(())
}

// ── Admission controller ──────────────────────────────────────────────────────

/// Let the highest-priority stop-line cars into the junction under segment
/// exclusion; stop the ones whose path is blocked.
///
/// Segment indices are absolute ring positions: every admission claims the
/// leading `0..w` cells, so a later admission conflicts with any earlier one
/// of equal or greater width.  The claimed range is intentionally not
/// rotated to the entry road's ring position; callers rely on the
/// conservative overlap.
fn admit_waiting_cars(
    cars: &mut [Car],
    junction: &Junction,
    per_road: &FxHashMap<usize, Vec<usize>>,
    decided: &mut FxHashMap<usize, f64>,
    network: &RoadNetwork,
    params: &DispatchParams,
) {
    // First in line on each road, if it has reached the stop line.
    let mut waiting: Vec<(usize, usize)> = Vec::new();
    for (&road_idx, bucket) in per_road {
        if let Some(&first) = bucket.first() {
            if cars[first].distance_to(junction) <= params.junction_buffer_zone {
                waiting.push((road_idx, first));
            }
        }
    }

    let mut taken_segments: FxHashSet<usize> = FxHashSet::default();

    while !waiting.is_empty() {
        // Each admission changes the mix, so re-rank every pass.  Queue
        // lengths include the candidates themselves throughout; buckets are
        // only trimmed after the controller is done.
        let mut ranked: Vec<(f64, usize, usize)> = waiting
            .iter()
            .map(|&(road_idx, car_idx)| {
                let cars_in_line = per_road[&road_idx].len() - 1;
                let segments = required_segments(&cars[car_idx], junction);
                let score = priority_score(
                    &cars[car_idx],
                    cars_in_line,
                    segments,
                    params.combine_mode,
                    &params.weights,
                );
                (score, road_idx, car_idx)
            })
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        let (_, road_idx, car_idx) = ranked[0];
        waiting.retain(|&(_, c)| c != car_idx);

        let width = required_segments(&cars[car_idx], junction);
        if (0..width).all(|segment| !taken_segments.contains(&segment)) {
            // Clear to go at the road's advisory limit; a road without one
            // leaves the speed alone.
            let limit = network.road_at(road_idx).recommended_speed;
            if limit > 0.0 {
                cars[car_idx].speed = limit;
            }
            taken_segments.extend(0..width);
        } else {
            // Refused this tick.
            cars[car_idx].speed = 0.0;
        }
        decided.insert(road_idx, cars[car_idx].speed);
    }
}

/// Ring cells the car sweeps turning from its road onto its target road.
/// Unknown or missing roads occupy nothing.
fn required_segments(car: &Car, junction: &Junction) -> usize {
    match (&car.road_id, &car.target_road_id) {
        (Some(road), Some(target)) => {
            junction.crossing_segments_count(road.as_str(), target.as_str())
        }
        _ => 0,
    }
}

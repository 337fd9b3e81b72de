//! Per-tick resolution of a car's current road and next junction.
//!
//! Both resolvers are lenient: a car the topology cannot account for is
//! left untouched and simply won't take part in per-junction grouping.

use td_topo::{Junction, ROAD_PROBE_RADIUS, RoadNetwork};

use crate::Car;

/// Attach the road carrying the car, probing the spatial index with a
/// 1-unit buffer around its position.  On a miss the car keeps an unset
/// road — the dispatch loops skip it.
pub fn set_current_road(car: &mut Car, network: &RoadNetwork) {
    if let Some(index) = network.road_index_for_point(car.x, car.y, ROAD_PROBE_RADIUS) {
        car.road_idx = Some(index);
        car.road_id = Some(network.road_at(index).id.clone());
    }
}

/// Attach the junction the car is driving toward.
///
/// The heading is the car's `rotation`; projecting it against the carrying
/// road picks the endpoint ahead, and the junction nearest that endpoint
/// wins.  Requires a resolved road; on projection failure the car keeps
/// whatever `next_junction_id` it arrived with.
pub fn set_next_junction(car: &mut Car, network: &RoadNetwork, junctions: &[Junction]) {
    let Some(road_idx) = car.road_idx else {
        return;
    };
    let Ok(endpoint) = network.road_at(road_idx).end_toward(car.x, car.y, car.rotation) else {
        return;
    };

    let closest = junctions.iter().min_by(|a, b| {
        a.center()
            .distance_sq(endpoint)
            .total_cmp(&b.center().distance_sq(endpoint))
    });
    if let Some(junction) = closest {
        car.next_junction_id = Some(junction.junction_id.clone());
    }
}

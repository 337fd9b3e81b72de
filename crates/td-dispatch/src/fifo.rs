//! Legacy first-in-first-out dispatch.
//!
//! The original fleet controller: per junction, the closest car keeps its
//! speed and every car behind it gives up a fixed decay per queue position.
//! No admission control, no kinematics — kept as the safe fallback strategy.

use td_topo::Junction;

use crate::Car;

/// Speed given up per queue position, units/second.
pub const DEFAULT_SPEED_DECAY: f64 = 3.0;

/// Queue floor: FIFO never orders a car below this speed, whatever the
/// road limit says.
pub const MIN_QUEUE_SPEED: f64 = 1.0;

/// Run one FIFO tick over all junctions, mutating car speeds in place.
pub fn dispatch(cars: &mut [Car], junctions: &[Junction], speed_decay: f64) {
    for junction in junctions {
        let mut queue: Vec<usize> = (0..cars.len())
            .filter(|&i| {
                cars[i]
                    .next_junction_id
                    .as_ref()
                    .is_some_and(|id| *id == junction.junction_id)
            })
            .collect();
        if queue.is_empty() {
            continue;
        }

        queue.sort_by(|&a, &b| {
            cars[a]
                .sq_distance_to(junction)
                .total_cmp(&cars[b].sq_distance_to(junction))
        });

        let base_speed = cars[queue[0]].speed;
        for (position, &index) in queue.iter().enumerate().skip(1) {
            cars[index].speed = (base_speed - position as f64 * speed_decay).max(MIN_QUEUE_SPEED);
        }
    }
}

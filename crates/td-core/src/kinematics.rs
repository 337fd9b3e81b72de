//! Constant-acceleration kinematics for per-tick speed targets.
//!
//! The solver answers one question: given the distance left before a
//! constraint (stop line, slower leader, zone boundary), what is the highest
//! speed a car may aim for during the next tick while still being able to
//! come to a full stop before the constraint?
//!
//! # Solver strategy
//!
//! The worst-case stopping distance from the speed limit (padded by
//! [`BRAKE_EPSILON`]) is reserved up front; whatever remains is the travel
//! budget for this tick.  The budget is solved in closed form assuming one
//! constant-acceleration ramp spanning the whole tick.  When re-integrating
//! the closed-form target overshoots the budget (the clamp at zero broke the
//! ramp assumption), a bounded binary search over `[0, speed_limit]` takes
//! over.

/// Safety margin applied to the worst-case stopping distance.
const BRAKE_EPSILON: f64 = 0.25;

/// Relative tolerance of the fallback speed search.
const SOLVE_TOLERANCE: f64 = 0.1;

/// Iteration cap of the fallback speed search.
const MAX_SOLVE_ITERATIONS: u32 = 5;

/// Distance needed to change speed from `curr` to `target` at constant rate.
///
/// `acceleration` applies when speeding up, `deceleration` when slowing
/// down.  A missing capacity (zero in the applicable direction) makes the
/// change unreachable: the result is `f64::INFINITY`.  A negative
/// `acceleration` passed in place of a deceleration is accepted and used
/// with its sign flipped.
pub fn required_distance_to_speed(
    curr: f64,
    target: f64,
    acceleration: f64,
    deceleration: f64,
) -> f64 {
    if target == curr {
        return 0.0;
    }

    let speeding_up = target > curr;
    let rate = if speeding_up {
        if acceleration <= 0.0 {
            return f64::INFINITY;
        }
        acceleration
    } else if deceleration > 0.0 {
        deceleration
    } else if acceleration < 0.0 {
        -acceleration
    } else {
        return f64::INFINITY;
    };

    (target * target - curr * curr).abs() / (2.0 * rate)
}

/// The largest speed a car may attempt for this tick.
///
/// Guarantees:
/// - never negative, never above `speed_limit`;
/// - returns 0 whenever a stop from `speed_limit` cannot be proven to fit
///   inside `max_distance`;
/// - a non-positive `duration_s` means the tick clock is corrupt — slow to
///   a stop rather than guess.
///
/// Cars already above the speed limit are not specially handled; the clamp
/// keeps the output sane and the brake margin keeps it safe.
pub fn max_target_speed(
    duration_s: f64,
    max_distance: f64,
    speed_limit: f64,
    curr_speed: f64,
    acceleration: f64,
    braking: f64,
) -> f64 {
    if duration_s <= 0.0 {
        return 0.0;
    }

    // Fast path: a full tick at the limit fits inside the budget.
    if curr_speed < speed_limit && speed_limit * duration_s < max_distance {
        return speed_limit;
    }

    let brake_distance =
        required_distance_to_speed(speed_limit, 0.0, 0.0, braking) * (1.0 + BRAKE_EPSILON);
    if brake_distance >= max_distance {
        return 0.0;
    }

    let budget = max_distance - brake_distance;

    // Closed form: one constant-acceleration ramp from curr_speed spanning
    // the whole tick, mean speed covering exactly the budget.
    let target = (2.0 * budget / duration_s - curr_speed).clamp(0.0, speed_limit);
    let traveled = 0.5 * (curr_speed + target) * duration_s;
    let target = if traveled <= budget * (1.0 + SOLVE_TOLERANCE) {
        target
    } else {
        accelerate_to_fit(curr_speed, duration_s, budget, speed_limit, acceleration, braking)
    };

    target.clamp(0.0, speed_limit)
}

/// Binary search for the speed whose ramp-then-cruise profile consumes
/// `duration` and covers `distance` within [`SOLVE_TOLERANCE`].
fn accelerate_to_fit(
    curr_speed: f64,
    duration: f64,
    distance: f64,
    speed_limit: f64,
    acceleration: f64,
    braking: f64,
) -> f64 {
    let mut low = 0.0_f64;
    let mut high = speed_limit;

    for _ in 0..MAX_SOLVE_ITERATIONS {
        // Interval collapsed to within tolerance.
        if low * (1.0 + SOLVE_TOLERANCE) > high {
            break;
        }
        let mid = 0.5 * (low + high);

        let ramp_distance = required_distance_to_speed(curr_speed, mid, acceleration, braking);
        let mean = 0.5 * (curr_speed + mid);
        let ramp_time = if ramp_distance == 0.0 || mean == 0.0 {
            0.0
        } else {
            ramp_distance / mean
        };

        // Ramp alone blows the tick or the budget: aim lower.
        if ramp_time > duration || ramp_distance > distance {
            high = mid;
            continue;
        }

        let traveled = ramp_distance + mid * (duration - ramp_time);
        if traveled < distance {
            if distance * (1.0 - SOLVE_TOLERANCE) < traveled {
                return mid;
            }
            low = mid;
        } else {
            high = mid;
        }
    }

    0.5 * (low + high)
}

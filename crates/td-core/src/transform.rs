//! Scalar weight transforms.
//!
//! Pure, total functions used by the priority scorer to turn raw car
//! attributes (queue length, waiting time, speed) into comparable weights.
//! Each takes a multiplier `k` and, where it makes sense, an optional cap.

/// `min(x, cap) * k`; uncapped when `cap` is `None`.
pub fn linear(x: f64, k: f64, cap: Option<f64>) -> f64 {
    match cap {
        Some(cap) => x.min(cap) * k,
        None => x * k,
    }
}

/// `k / (1 + e^-x)` — squashes any input into `(0, k)`.
pub fn logistic(x: f64, k: f64) -> f64 {
    k / (1.0 + (-x).exp())
}

/// `min(base^x * k, cap)`; uncapped when `cap` is `None`.
pub fn exponential(x: f64, base: f64, k: f64, cap: Option<f64>) -> f64 {
    let value = base.powf(x) * k;
    match cap {
        Some(cap) => value.min(cap),
        None => value,
    }
}

/// `k * log_base(x)` for positive `x`; defined as 0 for `x <= 0`.
pub fn logarithmic(x: f64, base: f64, k: f64) -> f64 {
    if x <= 0.0 { 0.0 } else { x.log(base) * k }
}

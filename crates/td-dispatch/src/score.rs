//! Priority scoring for junction admission.

use std::str::FromStr;

use td_core::transform;

use crate::{Car, DispatchError};

// ── CombineMode ───────────────────────────────────────────────────────────────

/// How the individual attribute weights fold into one score.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CombineMode {
    #[default]
    Sum,
    Mult,
}

impl FromStr for CombineMode {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "mult" => Ok(Self::Mult),
            other => Err(DispatchError::Config(format!(
                "invalid combine_mode {other:?}; use \"sum\" or \"mult\""
            ))),
        }
    }
}

// ── ScoreWeights ──────────────────────────────────────────────────────────────

/// Per-attribute weight overrides.  `None` slots use the defaults:
///
/// | Attribute            | Default                          |
/// |----------------------|----------------------------------|
/// | `cars_in_line`       | `linear(x, 1)`                   |
/// | `required_segments`  | `linear(x, 3)`                   |
/// | `seconds_in_traffic` | `exponential(x, base 2, cap 10)` |
/// | `speed`              | `logarithmic(x, base 10)`        |
#[derive(Copy, Clone, Default)]
pub struct ScoreWeights {
    pub cars_in_line: Option<fn(f64) -> f64>,
    pub required_segments: Option<fn(f64) -> f64>,
    pub seconds_in_traffic: Option<fn(f64) -> f64>,
    pub speed: Option<fn(f64) -> f64>,
}

fn default_cars_in_line(x: f64) -> f64 {
    transform::linear(x, 1.0, None)
}

fn default_required_segments(x: f64) -> f64 {
    transform::linear(x, 3.0, None)
}

fn default_seconds_in_traffic(x: f64) -> f64 {
    transform::exponential(x, 2.0, 1.0, Some(10.0))
}

fn default_speed(x: f64) -> f64 {
    transform::logarithmic(x, 10.0, 1.0)
}

/// Admission priority of a waiting car; higher goes first.
///
/// Weighs how many cars queue behind it, how much of the junction interior
/// it will occupy, how long it has been waiting (saturating, so starvation
/// pressure stops compounding), and how fast it is currently going —
/// stopping a fast car wastes more than holding a slow one.
pub fn priority_score(
    car: &Car,
    cars_in_line: usize,
    required_segments: usize,
    mode: CombineMode,
    weights: &ScoreWeights,
) -> f64 {
    let parts = [
        weights.cars_in_line.unwrap_or(default_cars_in_line)(cars_in_line as f64),
        weights.required_segments.unwrap_or(default_required_segments)(required_segments as f64),
        weights.seconds_in_traffic.unwrap_or(default_seconds_in_traffic)(car.seconds_in_traffic),
        weights.speed.unwrap_or(default_speed)(car.speed),
    ];

    match mode {
        CombineMode::Sum => parts.iter().sum(),
        CombineMode::Mult => parts.iter().product(),
    }
}

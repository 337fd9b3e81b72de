//! Topology-subsystem error type.

use thiserror::Error;

use td_core::RoadId;

/// Errors produced by `td-topo`.
#[derive(Debug, Error)]
pub enum TopoError {
    #[error("point ({x:.3}, {y:.3}) is not on any segment of road {road}")]
    OffSegment { x: f64, y: f64, road: RoadId },
}

pub type TopoResult<T> = Result<T, TopoError>;

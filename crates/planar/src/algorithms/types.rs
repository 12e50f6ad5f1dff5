//! Capability contract, result variants and the single error kind.

use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Output of an algorithm, drawn on top of the plane by the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlgorithmResult {
    /// Two points and the Euclidean distance between them, as computed by the producer.
    PointPair {
        p1: Vector2<f64>,
        p2: Vector2<f64>,
        distance: f64,
    },
    Line {
        start: Vector2<f64>,
        end: Vector2<f64>,
    },
    Points {
        list: Vec<Vector2<f64>>,
    },
}

impl AlgorithmResult {
    /// Distance carried by a `PointPair`, `None` for the other variants.
    pub fn distance(&self) -> Option<f64> {
        match self {
            AlgorithmResult::PointPair { distance, .. } => Some(*distance),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlgoError {
    /// Fewer input points than the algorithm's declared minimum.
    InvalidArgument {
        algorithm: String,
        required: usize,
        given: usize,
    },
}

impl fmt::Display for AlgoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgoError::InvalidArgument {
                algorithm,
                required,
                given,
            } => write!(
                f,
                "invalid argument: {algorithm} requires at least {required} points, got {given}"
            ),
        }
    }
}

impl std::error::Error for AlgoError {}

/// A named algorithm over a list of plane points.
///
/// Implementations hold no per-call mutable state; `execute` must not depend on
/// earlier calls.
pub trait GeometryAlgorithm: Send + Sync {
    fn name(&self) -> &str;
    fn minimum_points(&self) -> usize;
    fn execute(&self, points: &[Vector2<f64>]) -> Result<AlgorithmResult, AlgoError>;
}

/// Fail with `InvalidArgument` unless `points` meets `alg.minimum_points()`.
pub fn ensure_minimum(
    alg: &dyn GeometryAlgorithm,
    points: &[Vector2<f64>],
) -> Result<(), AlgoError> {
    if points.len() < alg.minimum_points() {
        return Err(AlgoError::InvalidArgument {
            algorithm: alg.name().to_string(),
            required: alg.minimum_points(),
            given: points.len(),
        });
    }
    Ok(())
}

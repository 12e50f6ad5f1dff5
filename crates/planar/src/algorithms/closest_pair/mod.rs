//! Closest pair of points in the plane.
//!
//! - `closest_pair_naive`: all pairs `(i, j)`, `i < j`, ascending; O(n²).
//! - `closest_pair_divide_and_conquer`: presorted by x and y, median split, linear
//!   y-partition per level, strip merge guarded by distance only; O(n log n).
//!
//! Both use `geom::distance`, so on the same input they report the same minimal
//! distance exactly. The returned pair may differ only when several pairs tie.
//!
//! Tie-break: the earliest pair found in scan order wins; a later pair replaces the
//! current best only if strictly closer.

mod dc;
mod naive;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::types::{ensure_minimum, AlgoError, AlgorithmResult, GeometryAlgorithm};

pub use dc::closest_pair_divide_and_conquer;
pub use naive::closest_pair_naive;

/// Best pair: input indices, the points themselves, and their distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClosestPair {
    pub i: usize,
    pub j: usize,
    pub p1: Vector2<f64>,
    pub p2: Vector2<f64>,
    pub distance: f64,
}

impl ClosestPair {
    pub(crate) fn from_indices(points: &[Vector2<f64>], i: usize, j: usize, distance: f64) -> Self {
        Self {
            i,
            j,
            p1: points[i],
            p2: points[j],
            distance,
        }
    }
}

impl From<ClosestPair> for AlgorithmResult {
    fn from(cp: ClosestPair) -> Self {
        AlgorithmResult::PointPair {
            p1: cp.p1,
            p2: cp.p2,
            distance: cp.distance,
        }
    }
}

/// Exhaustive all-pairs closest pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosestPairNaive;

impl GeometryAlgorithm for ClosestPairNaive {
    fn name(&self) -> &str {
        "Closest Pair - Naive"
    }

    fn minimum_points(&self) -> usize {
        2
    }

    fn execute(&self, points: &[Vector2<f64>]) -> Result<AlgorithmResult, AlgoError> {
        ensure_minimum(self, points)?;
        Ok(naive::scan(points).into())
    }
}

/// Divide-and-conquer closest pair.
///
/// Sub-problems with at least `parallel_cutoff` points solve both halves on the rayon
/// pool and join before the strip merge.
#[derive(Clone, Copy, Debug)]
pub struct ClosestPairDivideAndConquer {
    parallel_cutoff: usize,
}

impl ClosestPairDivideAndConquer {
    pub const DEFAULT_PARALLEL_CUTOFF: usize = 2048;

    pub fn with_parallel_cutoff(parallel_cutoff: usize) -> Self {
        Self { parallel_cutoff }
    }

    /// Single-threaded recursion.
    pub fn sequential() -> Self {
        Self::with_parallel_cutoff(usize::MAX)
    }

    pub fn parallel_cutoff(&self) -> usize {
        self.parallel_cutoff
    }
}

impl Default for ClosestPairDivideAndConquer {
    fn default() -> Self {
        Self::with_parallel_cutoff(Self::DEFAULT_PARALLEL_CUTOFF)
    }
}

impl GeometryAlgorithm for ClosestPairDivideAndConquer {
    fn name(&self) -> &str {
        "Closest Pair - Divide & Conquer"
    }

    fn minimum_points(&self) -> usize {
        2
    }

    fn execute(&self, points: &[Vector2<f64>]) -> Result<AlgorithmResult, AlgoError> {
        ensure_minimum(self, points)?;
        Ok(dc::solve(points, self.parallel_cutoff).into())
    }
}

#[cfg(test)]
mod tests;

use nalgebra::Vector2;

use super::ClosestPair;
use crate::geom::distance;

/// All-pairs scan over `(i, j)`, `i < j`, in ascending order. `None` for fewer than 2 points.
pub fn closest_pair_naive(points: &[Vector2<f64>]) -> Option<ClosestPair> {
    (points.len() >= 2).then(|| scan(points))
}

/// Requires at least 2 points.
pub(super) fn scan(points: &[Vector2<f64>]) -> ClosestPair {
    debug_assert!(points.len() >= 2);
    let (mut bi, mut bj, mut bd) = (0, 1, distance(points[0], points[1]));
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = distance(points[i], points[j]);
            if d < bd {
                (bi, bj, bd) = (i, j, d);
            }
        }
    }
    ClosestPair::from_indices(points, bi, bj, bd)
}

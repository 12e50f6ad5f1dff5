use std::cmp::Ordering;

use nalgebra::Vector2;

/// Euclidean distance `sqrt(dx² + dy²)` in f64.
///
/// Symmetric bit-for-bit: `distance(a, b) == distance(b, a)`.
#[inline]
pub fn distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Total order on finite floats; NaN compares equal so sorts stay stable.
#[inline]
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

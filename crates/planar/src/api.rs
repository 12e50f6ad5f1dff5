//! Curated surface for embedding applications (renderers, panels, drivers).
//!
//! Prefer these re-exports over reaching into submodules; module layout may change.

// Value types
pub use crate::geom::rand::{rand_lattice_points, rand_points, rand_points_with};
pub use crate::geom::{distance, Affine2};
// Viewport
pub use crate::view::{CommitTicker, TransformEngine, ViewCfg, Viewport};
// Scene
pub use crate::scene::{PointId, PointStore, Scene, SceneSnapshot, SelectionSet};
// Algorithms
pub use crate::algorithms::{
    closest_pair_divide_and_conquer, closest_pair_naive, AlgoError, AlgorithmRegistry,
    AlgorithmResult, ClosestPair, ClosestPairDivideAndConquer, ClosestPairNaive,
    GeometryAlgorithm,
};
// Session and events
pub use crate::events::{EventBus, SceneEvent};
pub use crate::session::{Click, Frame, InputEvent, Session};

use nalgebra::Vector2;

/// Minimal distance over `points` by both algorithms, `None` if they disagree or
/// there are fewer than two points.
pub fn cross_checked_min_distance(points: &[Vector2<f64>]) -> Option<f64> {
    let naive = closest_pair_naive(points)?;
    let dc = closest_pair_divide_and_conquer(points)?;
    (naive.distance == dc.distance).then_some(naive.distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn cross_check_simple() {
        let pts = vec![vector![0.0, 0.0], vector![10.0, 10.0]];
        assert_eq!(cross_checked_min_distance(&pts), Some(200f64.sqrt()));
        assert_eq!(cross_checked_min_distance(&pts[..1]), None);
    }

    #[test]
    fn cross_check_randomized_seeded() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [2usize, 3, 4, 5, 17, 64, 199, 200] {
            let pts = rand_points_with(&mut rng, n, 1000.0);
            assert!(cross_checked_min_distance(&pts).is_some(), "n={n}");
        }
    }

    #[test]
    fn default_registry_order_and_lookup() {
        let reg = AlgorithmRegistry::with_defaults();
        let names: Vec<_> = reg.names().collect();
        assert_eq!(
            names,
            vec!["Closest Pair - Naive", "Closest Pair - Divide & Conquer"]
        );
        assert_eq!(reg.list()[1].minimum_points(), 2);
        assert!(reg.lookup("nope").is_none());
    }
}

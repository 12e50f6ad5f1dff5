//! Seeded random point clouds for experiments, benches and tests.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `n` points drawn uniformly from `[-extent, extent]²`, reproducible by `seed`.
pub fn rand_points(n: usize, extent: f64, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    rand_points_with(&mut rng, n, extent)
}

/// Same as `rand_points`, drawing from a caller-owned RNG.
pub fn rand_points_with<R: Rng>(rng: &mut R, n: usize, extent: f64) -> Vec<Vector2<f64>> {
    let e = extent.abs();
    (0..n)
        .map(|_| Vector2::new(rng.gen_range(-e..=e), rng.gen_range(-e..=e)))
        .collect()
}

/// Integer lattice points in `[-half, half]²`; small `half` yields many duplicates and ties.
pub fn rand_lattice_points(n: usize, half: i32, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let h = half.abs();
    (0..n)
        .map(|_| {
            Vector2::new(
                f64::from(rng.gen_range(-h..=h)),
                f64::from(rng.gen_range(-h..=h)),
            )
        })
        .collect()
}

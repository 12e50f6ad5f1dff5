//! Closest-pair timing probe across input sizes.
//!
//! Purpose
//! - Give a code-backed answer to "from which selection size does divide and conquer
//!   pay off against the exhaustive scan?"
//! - Double as a smoke cross-check: both algorithms must report the same distance.
//!
//! Usage:
//!   cargo run -p planar --release --example closest_pair_timing

use std::time::Instant;

use planar::algorithms::{closest_pair_naive, ClosestPairDivideAndConquer, GeometryAlgorithm};
use planar::geom::rand::rand_points;

fn main() {
    let dc = ClosestPairDivideAndConquer::sequential();
    println!("{:>8} {:>12} {:>12} {:>14}", "n", "naive_ms", "dc_ms", "distance");
    for (k, n) in [2usize, 10, 50, 200, 1000, 4000].into_iter().enumerate() {
        let pts = rand_points(n, 1000.0, 100 + k as u64);

        let t0 = Instant::now();
        let naive = closest_pair_naive(&pts).expect("n >= 2");
        let naive_ms = t0.elapsed().as_secs_f64() * 1e3;

        let t1 = Instant::now();
        let res = dc.execute(&pts).expect("n >= 2");
        let dc_ms = t1.elapsed().as_secs_f64() * 1e3;

        let d = res.distance().expect("point pair");
        assert_eq!(d, naive.distance, "algorithms disagree at n={n}");
        println!("{n:>8} {naive_ms:>12.3} {dc_ms:>12.3} {d:>14.6}");
    }
}

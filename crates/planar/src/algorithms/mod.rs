//! Pluggable geometry algorithms run against the selected points.
//!
//! Purpose
//! - `GeometryAlgorithm`: named, stateless capability with a declared minimum input size.
//! - `AlgorithmRegistry`: ordered, explicitly owned list of algorithms (no global state).
//! - Closest pair: exhaustive O(n²) scan and O(n log n) divide and conquer, kept side by side
//!   so either one can cross-check the other.
//!
//! Contract
//! - Callers check `minimum_points` before running; an algorithm invoked with fewer points
//!   fails with `AlgoError::InvalidArgument` instead of silently returning nothing.
//! - Algorithms are pure: safe to call concurrently from any thread.

pub mod closest_pair;
mod registry;
mod types;

pub use closest_pair::{
    closest_pair_divide_and_conquer, closest_pair_naive, ClosestPair,
    ClosestPairDivideAndConquer, ClosestPairNaive,
};
pub use registry::AlgorithmRegistry;
pub use types::{ensure_minimum, AlgoError, AlgorithmResult, GeometryAlgorithm};

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use nalgebra::Vector2;

use super::closest_pair::{ClosestPairDivideAndConquer, ClosestPairNaive};
use super::types::{AlgoError, AlgorithmResult, GeometryAlgorithm};

/// Ordered list of algorithms, built once at startup and then shared read-only.
///
/// Names are not required to be unique: `lookup` returns the first registered match
/// and later duplicates stay listed.
#[derive(Clone, Default)]
pub struct AlgorithmRegistry {
    algorithms: Vec<Arc<dyn GeometryAlgorithm>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the naive and divide-and-conquer closest-pair algorithms, in that order.
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        reg.register(ClosestPairNaive);
        reg.register(ClosestPairDivideAndConquer::default());
        reg
    }

    pub fn register<A: GeometryAlgorithm + 'static>(&mut self, alg: A) {
        self.register_shared(Arc::new(alg));
    }

    pub fn register_shared(&mut self, alg: Arc<dyn GeometryAlgorithm>) {
        tracing::debug!(name = alg.name(), index = self.algorithms.len(), "register algorithm");
        self.algorithms.push(alg);
    }

    /// Algorithms in registration order.
    pub fn list(&self) -> &[Arc<dyn GeometryAlgorithm>] {
        &self.algorithms
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.algorithms.iter().map(|a| a.name())
    }

    /// First algorithm registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn GeometryAlgorithm>> {
        self.algorithms.iter().find(|a| a.name() == name)
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Run `alg` on `points`. The minimum-size check is the caller's; a short input
    /// surfaces as the algorithm's `InvalidArgument`.
    pub fn execute(
        &self,
        alg: &dyn GeometryAlgorithm,
        points: &[Vector2<f64>],
    ) -> Result<AlgorithmResult, AlgoError> {
        let start = Instant::now();
        let res = alg.execute(points);
        match &res {
            Ok(_) => tracing::debug!(
                name = alg.name(),
                n = points.len(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "algorithm finished"
            ),
            Err(err) => tracing::warn!(name = alg.name(), n = points.len(), %err, "algorithm rejected input"),
        }
        res
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

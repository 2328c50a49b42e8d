//! Store configuration.

use crate::distance::DistanceMetric;
use serde::{Deserialize, Serialize};

/// Capacity of the backing array after the first insert.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Store size at which a search scan is spread across worker threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Configuration for a [`VectorStore`](crate::VectorStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Length of every stored vector. Must be non-zero.
    pub dimensions: usize,
    /// Distance metric used by search.
    pub metric: DistanceMetric,
    /// Capacity reserved when the backing array first grows; doubled after that.
    pub initial_capacity: usize,
    /// Minimum entry count for a parallel scan (only with `multithreaded`).
    pub parallel_threshold: usize,
}

impl StoreConfig {
    pub fn new(dimensions: usize, metric: DistanceMetric) -> Self {
        Self {
            dimensions,
            metric,
            ..Self::default()
        }
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity.max(1);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dimensions: 128,
            metric: DistanceMetric::Cosine,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

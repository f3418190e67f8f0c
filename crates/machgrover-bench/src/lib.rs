//! Depth benchmarks for Machgrover.
//!
//! Sweeps a list of qubit counts and measures, for each size:
//! - **Diffuser**: logical and decomposed depth of the reflection circuit,
//! - **Grover**: the same for a full search circuit with a mock oracle.
//!
//! Sweeps are driven by a [`DepthBenchConfig`], which can be loaded from
//! YAML or JSON, and produce a [`DepthReport`] that renders as a console
//! table and serializes to JSON.

pub mod config;
pub mod depth;
pub mod error;

pub use config::DepthBenchConfig;
pub use depth::{
    DepthRecord, DepthReport, SkippedSize, alternating_key, benchmark_diffuser, benchmark_grover,
    random_key,
};
pub use error::{BenchError, BenchResult};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Name of the benchmark.
    pub name: String,
    /// Primary metric value.
    pub value: f64,
    /// Unit of the primary metric.
    pub unit: String,
    /// Total wall-clock time.
    pub duration: Duration,
    /// Additional metrics.
    pub metrics: serde_json::Map<String, serde_json::Value>,
}

impl BenchmarkResult {
    /// Create a new benchmark result.
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            duration: Duration::ZERO,
            metrics: serde_json::Map::new(),
        }
    }

    /// Set the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add a metric.
    #[must_use]
    pub fn with_metric(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metrics.insert(key.into(), value.into());
        self
    }
}

//! Depth sweeps over the diffuser and the full Grover circuit.
//!
//! Each sweep builds one circuit per configured qubit count and records its
//! logical depth, its width and the depth after lowering every MCX. A size
//! that fails to build is logged and skipped; the sweep carries on with the
//! next one.

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use machgrover::{
    GroverResult, build_diffuser, build_grover_circuit, create_mock_oracle_with_mode, decompose,
};
use machgrover_ir::Circuit;

use crate::BenchmarkResult;
use crate::config::DepthBenchConfig;
use crate::error::BenchResult;

/// Measurements for one qubit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRecord {
    /// Search register size the circuit was built for.
    pub n_qubits: u32,
    /// Logical depth, multi-controlled gates counted as one layer.
    pub depth: usize,
    /// Width of the built circuit, ancillas included.
    pub num_qubits_reported: usize,
    /// Depth after lowering at the configured optimization level.
    pub decomposed_depth: usize,
    /// Logical gate count.
    pub num_ops: usize,
}

/// A qubit count the sweep could not build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSize {
    /// The rejected qubit count.
    pub n_qubits: u32,
    /// Why it was rejected.
    pub reason: String,
}

/// Result of a depth sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthReport {
    /// Which construction was measured.
    pub name: String,
    /// Optimization level used for the decomposed depth.
    pub optimization_level: u8,
    /// One record per successfully built size, in configuration order.
    pub records: Vec<DepthRecord>,
    /// Sizes that failed to build.
    pub skipped: Vec<SkippedSize>,
    /// Wall-clock time of the whole sweep.
    pub duration: Duration,
}

impl DepthReport {
    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> BenchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report written by [`DepthReport::to_json`].
    pub fn from_json(json: &str) -> BenchResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up the record for `n_qubits`.
    pub fn record(&self, n_qubits: u32) -> Option<&DepthRecord> {
        self.records.iter().find(|r| r.n_qubits == n_qubits)
    }

    /// Whether logical depth never decreases from one record to the next.
    pub fn is_depth_monotonic(&self) -> bool {
        self.records.windows(2).all(|w| w[0].depth <= w[1].depth)
    }

    /// Whether decomposed depth never decreases from one record to the next.
    pub fn is_decomposed_depth_monotonic(&self) -> bool {
        self.records
            .windows(2)
            .all(|w| w[0].decomposed_depth <= w[1].decomposed_depth)
    }

    /// Summarize as a [`BenchmarkResult`] whose value is the deepest
    /// decomposed circuit.
    pub fn to_benchmark_result(&self) -> BenchmarkResult {
        let max_decomposed = self
            .records
            .iter()
            .map(|r| r.decomposed_depth)
            .max()
            .unwrap_or(0);
        let max_logical = self.records.iter().map(|r| r.depth).max().unwrap_or(0);
        BenchmarkResult::new(
            format!("{}_depth", self.name),
            max_decomposed as f64,
            "layers",
        )
        .with_duration(self.duration)
        .with_metric("max_logical_depth", max_logical)
        .with_metric("optimization_level", self.optimization_level)
        .with_metric("sizes_measured", self.records.len())
        .with_metric("sizes_skipped", self.skipped.len())
        .with_metric("depth_monotonic", self.is_depth_monotonic())
    }
}

impl fmt::Display for DepthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} depth (optimization level {})",
            self.name, self.optimization_level
        )?;
        writeln!(
            f,
            "{:>8}  {:>8}  {:>10}  {:>16}  {:>8}",
            "n_qubits", "depth", "num_qubits", "decomposed_depth", "num_ops"
        )?;
        for r in &self.records {
            writeln!(
                f,
                "{:>8}  {:>8}  {:>10}  {:>16}  {:>8}",
                r.n_qubits, r.depth, r.num_qubits_reported, r.decomposed_depth, r.num_ops
            )?;
        }
        for s in &self.skipped {
            writeln!(f, "skipped n_qubits = {}: {}", s.n_qubits, s.reason)?;
        }
        Ok(())
    }
}

/// The key `1010…` of `width` bits.
pub fn alternating_key(width: usize) -> String {
    (0..width)
        .map(|i| if i % 2 == 0 { '1' } else { '0' })
        .collect()
}

/// A uniformly random key of `width` bits.
pub fn random_key<R: Rng>(width: usize, rng: &mut R) -> String {
    (0..width)
        .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
        .collect()
}

/// Measure the diffuser at every configured qubit count.
///
/// # Errors
///
/// Only an invalid configuration fails the sweep; sizes that cannot be
/// built end up in [`DepthReport::skipped`].
#[instrument(skip(config), fields(sizes = ?config.qubit_counts))]
pub fn benchmark_diffuser(config: &DepthBenchConfig) -> BenchResult<DepthReport> {
    sweep("diffuser", config, build_diffuser)
}

/// Measure the full Grover circuit at every configured qubit count.
///
/// Each size gets a mock oracle with the configured ancillas and MCX mode,
/// marking either the alternating key or a random key drawn from
/// `config.key_seed`.
///
/// # Errors
///
/// Only an invalid configuration fails the sweep; sizes that cannot be
/// built end up in [`DepthReport::skipped`].
#[instrument(skip(config), fields(sizes = ?config.qubit_counts))]
pub fn benchmark_grover(config: &DepthBenchConfig) -> BenchResult<DepthReport> {
    let mut rng = config.key_seed.map(SmallRng::seed_from_u64);
    sweep("grover", config, |n| {
        let key = match rng.as_mut() {
            Some(rng) => random_key(n as usize, rng),
            None => alternating_key(n as usize),
        };
        debug!("Marking key {key:?} for n_qubits = {n}");
        let oracle =
            create_mock_oracle_with_mode(n, config.oracle_ancillas, &key, config.mcx_mode)?;
        build_grover_circuit(n, config.iterations, &oracle)
    })
}

fn sweep<F>(name: &str, config: &DepthBenchConfig, mut build: F) -> BenchResult<DepthReport>
where
    F: FnMut(u32) -> GroverResult<Circuit>,
{
    config.validate()?;
    let start = Instant::now();
    let level = config.optimization_level;

    let mut records = Vec::with_capacity(config.qubit_counts.len());
    let mut skipped = Vec::new();
    for &n in &config.qubit_counts {
        let measured = build(n).and_then(|circuit| {
            let lowered = decompose(&circuit, level)?;
            Ok(DepthRecord {
                n_qubits: n,
                depth: circuit.depth(),
                num_qubits_reported: circuit.num_qubits(),
                decomposed_depth: lowered.depth(),
                num_ops: circuit.num_ops(),
            })
        });
        match measured {
            Ok(record) => {
                info!(
                    "{name} n_qubits = {n}: depth {}, {} qubits, decomposed depth {}",
                    record.depth, record.num_qubits_reported, record.decomposed_depth
                );
                records.push(record);
            }
            Err(e) => {
                warn!("Skipping {name} at n_qubits = {n}: {e}");
                skipped.push(SkippedSize {
                    n_qubits: n,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(DepthReport {
        name: name.to_string(),
        optimization_level: level,
        records,
        skipped,
        duration: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use machgrover_ir::McxMode;

    #[test]
    fn test_keys() {
        assert_eq!(alternating_key(5), "10101");
        assert_eq!(alternating_key(0), "");

        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        let key = random_key(12, &mut a);
        assert_eq!(key.len(), 12);
        assert!(key.chars().all(|c| c == '0' || c == '1'));
        assert_eq!(key, random_key(12, &mut b));
    }

    #[test]
    fn test_diffuser_depths() {
        let config = DepthBenchConfig {
            qubit_counts: vec![1, 2, 5],
            ..Default::default()
        };
        let report = benchmark_diffuser(&config).unwrap();
        let depths: Vec<_> = report.records.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![5, 7, 7]);
        assert_eq!(report.record(5).unwrap().num_qubits_reported, 5);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_skips_bad_sizes() {
        let config = DepthBenchConfig {
            qubit_counts: vec![2, 0, 3],
            ..Default::default()
        };
        let report = benchmark_diffuser(&config).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].n_qubits, 0);
    }

    #[test]
    fn test_vchain_without_ancillas_is_skipped() {
        let config = DepthBenchConfig {
            qubit_counts: vec![2, 4],
            mcx_mode: McxMode::VChain,
            ..Default::default()
        };
        let report = benchmark_grover(&config).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].n_qubits, 2);
        assert_eq!(report.skipped[0].n_qubits, 4);
        assert!(report.skipped[0].reason.contains("ancilla"));
    }

    #[test]
    fn test_display_table() {
        let config = DepthBenchConfig {
            qubit_counts: vec![3, 0],
            ..Default::default()
        };
        let table = benchmark_diffuser(&config).unwrap().to_string();
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "diffuser depth (optimization level 0)");
        assert!(lines[1].contains("decomposed_depth"));
        assert!(lines[2].trim_start().starts_with('3'));
        assert!(lines[3].starts_with("skipped n_qubits = 0"));
    }

    #[test]
    fn test_benchmark_result_summary() {
        let report = benchmark_diffuser(&DepthBenchConfig::default()).unwrap();
        let result = report.to_benchmark_result();
        assert_eq!(result.name, "diffuser_depth");
        assert_eq!(result.unit, "layers");
        assert_eq!(result.metrics["max_logical_depth"], 7);
        assert_eq!(result.metrics["sizes_measured"], 4);
        assert_eq!(result.metrics["depth_monotonic"], true);
    }
}

//! Benchmark configuration.
//!
//! A [`DepthBenchConfig`] can be written in YAML or JSON; missing fields
//! take their defaults:
//!
//! ```yaml
//! qubit_counts: [4, 6, 8, 10]
//! iterations: 1
//! oracle_ancillas: 2
//! mcx_mode: v_chain
//! optimization_level: 1
//! key_seed: 42
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use machgrover_compile::MAX_OPTIMIZATION_LEVEL;
use machgrover_ir::McxMode;

use crate::error::{BenchError, BenchResult};

/// Configuration of a depth sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthBenchConfig {
    /// Search register sizes to sweep, in order.
    pub qubit_counts: Vec<u32>,
    /// Grover iterations per circuit.
    pub iterations: u32,
    /// Oracle ancillas, result qubit included.
    pub oracle_ancillas: u32,
    /// MCX synthesis mode requested from the oracle.
    pub mcx_mode: McxMode,
    /// Optimization level used for the decomposed depth.
    pub optimization_level: u8,
    /// Seed for random target keys. Without one the Grover sweep marks
    /// the alternating key `1010…`.
    pub key_seed: Option<u64>,
}

impl Default for DepthBenchConfig {
    fn default() -> Self {
        Self {
            qubit_counts: vec![4, 6, 8, 10],
            iterations: 1,
            oracle_ancillas: 1,
            mcx_mode: McxMode::Recursion,
            optimization_level: 0,
            key_seed: None,
        }
    }
}

impl DepthBenchConfig {
    /// Parse a YAML document.
    pub fn from_yaml(contents: &str) -> BenchResult<Self> {
        let config: Self = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document.
    pub fn from_json(contents: &str) -> BenchResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. `.json` files are read as JSON,
    /// anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> BenchResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> BenchResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check the configuration.
    ///
    /// Individual qubit counts are not checked here: a bad size is
    /// reported and skipped when the sweep reaches it.
    pub fn validate(&self) -> BenchResult<()> {
        if self.qubit_counts.is_empty() {
            return Err(BenchError::InvalidConfig(
                "qubit_counts must not be empty".into(),
            ));
        }
        if self.optimization_level > MAX_OPTIMIZATION_LEVEL {
            return Err(BenchError::InvalidConfig(format!(
                "optimization_level must be at most {MAX_OPTIMIZATION_LEVEL}, got {}",
                self.optimization_level
            )));
        }
        Ok(())
    }
}

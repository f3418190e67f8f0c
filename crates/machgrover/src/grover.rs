//! Grover circuit composition.
//!
//! Grover's algorithm finds a marked item in an unstructured search space
//! of size `N = 2^n` with `O(√N)` oracle queries.

use std::f64::consts::PI;

use tracing::{debug, info, instrument};

use machgrover_compile::transpile;
use machgrover_ir::{Circuit, McxMode, QubitId};

use crate::diffuser::build_diffuser;
use crate::error::{GroverError, GroverResult};
use crate::key::TargetKey;
use crate::oracle::OracleBuilder;

/// Calculate the optimal number of Grover iterations.
///
/// For a single marked item among `N = 2^n` states this is `π/4 · √N`,
/// rounded, and never less than one.
pub fn optimal_iterations(n_qubits: u32) -> u32 {
    let n = 2f64.powf(f64::from(n_qubits));
    let optimal = (PI / 4.0 * n.sqrt()).round();
    // Saturating float-to-int cast.
    (optimal as u32).max(1)
}

/// Build the full Grover circuit.
///
/// The circuit is named `grover` and spans all of the oracle's qubits. The
/// first `n_qubits` are the search register, the rest belong to the oracle.
/// It applies H to the search register, then `iterations` rounds of oracle
/// followed by diffuser. Every stage is closed by a labelled barrier:
/// `init_h`, `oracle_{i}`, `diffuser_{i}`.
///
/// # Errors
///
/// - [`GroverError::InvalidQubitCount`] if `n_qubits` is zero,
/// - [`GroverError::SearchSpaceTooWide`] if `n_qubits` exceeds the oracle width.
///
/// # Example
///
/// ```
/// use machgrover::{build_grover_circuit, create_mock_oracle};
///
/// let oracle = create_mock_oracle(3, 1, "101").unwrap();
/// let grover = build_grover_circuit(3, 2, &oracle).unwrap();
/// assert_eq!(grover.name(), "grover");
/// assert_eq!(grover.num_qubits(), 4);
/// ```
#[instrument(skip(oracle), fields(oracle = oracle.name()))]
pub fn build_grover_circuit(
    n_qubits: u32,
    iterations: u32,
    oracle: &Circuit,
) -> GroverResult<Circuit> {
    if n_qubits < 1 {
        return Err(GroverError::InvalidQubitCount {
            what: "search qubit count",
            got: n_qubits,
        });
    }
    let total = oracle.num_qubits();
    if n_qubits as usize > total {
        return Err(GroverError::SearchSpaceTooWide {
            n_qubits,
            oracle_qubits: total,
        });
    }

    let mut circuit = Circuit::new("grover");
    let search = circuit.add_qreg("search", n_qubits);
    // `total` came from a circuit, so it fits the IR's qubit ids.
    let extra = u32::try_from(total).unwrap_or(u32::MAX) - n_qubits;
    if extra > 0 {
        circuit.add_qreg("ancilla", extra);
    }
    let all: Vec<QubitId> = circuit.qubit_ids();

    for &q in &search {
        circuit.h(q)?;
    }
    circuit.barrier_labeled("init_h")?;

    let diffuser = build_diffuser(n_qubits)?;
    for i in 1..=iterations {
        circuit.compose(oracle, &all)?;
        circuit.barrier_labeled(format!("oracle_{i}"))?;
        circuit.compose(&diffuser, &search)?;
        circuit.barrier_labeled(format!("diffuser_{i}"))?;
        debug!("Appended Grover iteration {i}");
    }

    info!(
        "Built Grover circuit: {} qubits, {} iterations, depth {}",
        circuit.num_qubits(),
        iterations,
        circuit.depth()
    );
    Ok(circuit)
}

/// Lower every multi-controlled gate of `circuit` at `optimization_level`.
///
/// See [`machgrover_compile::PassManagerBuilder`] for the levels.
pub fn decompose(circuit: &Circuit, optimization_level: u8) -> GroverResult<Circuit> {
    Ok(transpile(circuit, optimization_level)?)
}

/// A complete search problem: key, oracle resources and iteration count.
///
/// ```
/// use machgrover::GroverSearch;
///
/// let search = GroverSearch::new("0110".parse().unwrap());
/// assert_eq!(search.iterations(), 3);
/// let circuit = search.build().unwrap();
/// assert_eq!(circuit.num_qubits(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct GroverSearch {
    key: TargetKey,
    oracle_ancillas: u32,
    iterations: Option<u32>,
    mcx_mode: McxMode,
}

impl GroverSearch {
    /// Search for `key` with one oracle ancilla and the optimal iteration count.
    pub fn new(key: TargetKey) -> Self {
        Self {
            key,
            oracle_ancillas: 1,
            iterations: None,
            mcx_mode: McxMode::default(),
        }
    }

    /// Set the number of oracle ancillas, result qubit included.
    #[must_use]
    pub fn with_oracle_ancillas(mut self, n: u32) -> Self {
        self.oracle_ancillas = n;
        self
    }

    /// Override the iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Set the MCX synthesis mode used by the oracle.
    #[must_use]
    pub fn with_mcx_mode(mut self, mode: McxMode) -> Self {
        self.mcx_mode = mode;
        self
    }

    /// The key being searched for.
    pub fn key(&self) -> &TargetKey {
        &self.key
    }

    /// Number of search qubits.
    pub fn n_qubits(&self) -> u32 {
        u32::try_from(self.key.len()).unwrap_or(u32::MAX)
    }

    /// The iteration count that will be used.
    pub fn iterations(&self) -> u32 {
        self.iterations
            .unwrap_or_else(|| optimal_iterations(self.n_qubits()))
    }

    /// Build the oracle alone.
    pub fn oracle(&self) -> GroverResult<Circuit> {
        OracleBuilder::new(self.key.clone())
            .with_ancillas(self.oracle_ancillas)
            .with_mcx_mode(self.mcx_mode)
            .build()
    }

    /// Build the logical Grover circuit.
    pub fn build(&self) -> GroverResult<Circuit> {
        let oracle = self.oracle()?;
        build_grover_circuit(self.n_qubits(), self.iterations(), &oracle)
    }

    /// Build the Grover circuit and lower it at `optimization_level`.
    pub fn build_decomposed(&self, optimization_level: u8) -> GroverResult<Circuit> {
        decompose(&self.build()?, optimization_level)
    }
}

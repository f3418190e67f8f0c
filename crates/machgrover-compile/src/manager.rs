//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use machgrover_ir::{Circuit, CircuitDag};

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{CancelInversePairs, McxSynthesis, ToffoliExpansion};
use crate::property::PropertySet;

/// Highest supported optimization level.
pub const MAX_OPTIMIZATION_LEVEL: u8 = 2;

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given DAG.
    #[instrument(skip(self, dag, properties))]
    pub fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            dag.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(dag, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(dag, properties)?;
                debug!("Pass {} completed, ops: {}", pass.name(), dag.num_ops());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            dag.depth(),
            dag.num_ops()
        );

        Ok(())
    }

    /// Names of the scheduled passes, in order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-2).
    optimization_level: u8,
    /// Properties handed to the passes.
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 0,
            properties: PropertySet::new(),
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: lower every multi-controlled X (default)
    /// - Level 1: also cancel adjacent self-inverse pairs
    /// - Level 2: also expand Toffolis to Clifford+T and cancel again
    ///
    /// Higher values are clamped to level 2.
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(MAX_OPTIMIZATION_LEVEL);
        self
    }

    /// Set the properties.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertySet) -> Self {
        self.properties = properties;
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(mut self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        pm.add_pass(McxSynthesis);

        if self.optimization_level >= 1 {
            pm.add_pass(CancelInversePairs);
        }

        if self.optimization_level >= 2 {
            self.properties.expand_toffoli = true;
            pm.add_pass(ToffoliExpansion);
            pm.add_pass(CancelInversePairs);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower `circuit` at the given optimization level.
///
/// Returns a new circuit with the same name and registers.
pub fn transpile(circuit: &Circuit, optimization_level: u8) -> CompileResult<Circuit> {
    let (pm, mut props) = PassManagerBuilder::new()
        .with_optimization_level(optimization_level)
        .build();
    let mut dag = circuit.dag().clone();
    pm.run(&mut dag, &mut props)?;
    Ok(circuit.clone().with_dag(dag)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use machgrover_ir::QubitId;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_pass_manager_run() {
        let pm = PassManager::new();
        let mut props = PropertySet::new();

        let mut circuit = Circuit::with_size("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        let mut dag = circuit.into_dag();
        pm.run(&mut dag, &mut props).unwrap();

        assert_eq!(dag.num_ops(), 2);
    }

    #[test]
    fn test_builder_levels() {
        let (pm, props) = PassManagerBuilder::new().build();
        assert_eq!(pm.pass_names(), vec!["McxSynthesis"]);
        assert!(!props.expand_toffoli);

        let (pm, _) = PassManagerBuilder::new().with_optimization_level(1).build();
        assert_eq!(pm.pass_names(), vec!["McxSynthesis", "CancelInversePairs"]);

        let (pm, props) = PassManagerBuilder::new().with_optimization_level(7).build();
        assert_eq!(
            pm.pass_names(),
            vec![
                "McxSynthesis",
                "CancelInversePairs",
                "ToffoliExpansion",
                "CancelInversePairs"
            ]
        );
        assert!(props.expand_toffoli);
    }

    #[test]
    fn test_transpile_keeps_metadata() {
        let mut circuit = Circuit::new("named");
        let q = circuit.add_qreg("search", 3);
        circuit.mcx(&q[..2], q[2]).unwrap();

        let lowered = transpile(&circuit, 0).unwrap();
        assert_eq!(lowered.name(), "named");
        assert_eq!(lowered.qubits()[2].register.as_deref(), Some("search"));
        assert_eq!(lowered.count_ops()["ccx"], 1);
        assert!(!lowered.count_ops().contains_key("mcx"));

        let expanded = transpile(&circuit, 2).unwrap();
        assert_eq!(expanded.num_ops(), 15);
    }
}

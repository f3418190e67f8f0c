//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{McxMode, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::{Qubit, QubitId};

/// A quantum circuit.
///
/// This provides a high-level API for building quantum circuits,
/// with convenient methods for common gates and operations.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// The underlying DAG representation.
    dag: CircuitDag,
    /// Counter for generating qubit IDs.
    next_qubit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            dag: CircuitDag::new(),
            next_qubit_id: 0,
        }
    }

    /// Create a circuit with a given number of qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.next_qubit_id);
        self.next_qubit_id += 1;
        self.qubits.push(Qubit::new(id));
        self.dag.add_qubit(id);
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = QubitId(self.next_qubit_id);
            self.next_qubit_id += 1;
            self.qubits.push(Qubit::with_register(id, &name, i));
            self.dag.add_qubit(id);
            ids.push(id);
        }
        ids
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))?;
        Ok(self)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::T, qubit))?;
        Ok(self)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))?;
        Ok(self)
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CZ,
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CP(theta),
            control,
            target,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))?;
        Ok(self)
    }

    /// Apply a multi-controlled X gate that needs no ancillas.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.mcx_with_mode(controls, target, &[], McxMode::NoAncilla)
    }

    /// Apply a multi-controlled X gate with an explicit synthesis mode.
    ///
    /// `ancillas` must hold exactly `mode.num_ancillas(controls.len())`
    /// qubits; the arity check in the DAG rejects anything else.
    pub fn mcx_with_mode(
        &mut self,
        controls: &[QubitId],
        target: QubitId,
        ancillas: &[QubitId],
        mode: McxMode,
    ) -> IrResult<&mut Self> {
        if controls.is_empty() {
            return Err(IrError::NoControls);
        }
        let num_ctrl = u32::try_from(controls.len())
            .map_err(|_| IrError::InvalidDag("too many controls".into()))?;
        let operands = controls
            .iter()
            .copied()
            .chain(std::iter::once(target))
            .chain(ancillas.iter().copied());
        self.dag
            .apply(Instruction::gate(StandardGate::Mcx { num_ctrl, mode }, operands))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Append a prepared instruction.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a labelled barrier to all qubits.
    pub fn barrier_labeled(&mut self, label: impl Into<String>) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.dag.apply(Instruction::labeled_barrier(label, qubits))?;
        Ok(self)
    }

    /// Append every instruction of `other`, sending its qubit `i` to
    /// `qubits[i]` of this circuit.
    ///
    /// The mapping is checked before anything is appended, so a failed
    /// compose leaves this circuit unchanged.
    pub fn compose(&mut self, other: &Circuit, qubits: &[QubitId]) -> IrResult<&mut Self> {
        if qubits.len() != other.num_qubits() {
            return Err(IrError::ComposeWidthMismatch {
                name: other.name.clone(),
                expected: other.num_qubits(),
                got: qubits.len(),
            });
        }
        let mut seen = FxHashSet::default();
        for &q in qubits {
            if !self.qubits.iter().any(|existing| existing.id == q) {
                return Err(IrError::QubitNotFound {
                    qubit: q,
                    gate_name: Some(other.name.clone()),
                });
            }
            if !seen.insert(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate_name: Some(other.name.clone()),
                });
            }
        }
        let mapping: FxHashMap<QubitId, QubitId> = other
            .qubits
            .iter()
            .map(|q| q.id)
            .zip(qubits.iter().copied())
            .collect();

        for inst in other.instructions() {
            self.dag.apply(inst.remapped(|q| mapping[&q]))?;
        }
        Ok(self)
    }

    /// Build the inverse circuit: reversed order, every gate inverted.
    pub fn inverse(&self) -> IrResult<Self> {
        let mut inverse = Self {
            name: format!("{}_dg", self.name),
            qubits: self.qubits.clone(),
            dag: CircuitDag::new(),
            next_qubit_id: self.next_qubit_id,
        };
        for qubit in &self.qubits {
            inverse.dag.add_qubit(qubit.id);
        }
        let ops: Vec<_> = self.instructions().collect();
        for inst in ops.into_iter().rev() {
            inverse.dag.apply(inst.inverse())?;
        }
        Ok(inverse)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Get the number of instructions, barriers included.
    pub fn num_ops(&self) -> usize {
        self.dag.num_ops()
    }

    /// Count instructions by name.
    pub fn count_ops(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for inst in self.instructions() {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Iterate over instructions in insertion order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.dag.topological_ops().map(|(_, inst)| inst)
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the ids of all qubits, in order.
    pub fn qubit_ids(&self) -> Vec<QubitId> {
        self.qubits.iter().map(|q| q.id).collect()
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Consume the circuit and return the DAG.
    pub fn into_dag(self) -> CircuitDag {
        self.dag
    }

    /// Create a circuit from a DAG.
    pub fn from_dag(name: impl Into<String>, dag: CircuitDag) -> Self {
        let qubits: Vec<_> = dag.qubits().map(Qubit::new).collect();
        let next_qubit_id = qubits.iter().map(|q| q.id.0 + 1).max().unwrap_or(0);

        Self {
            name: name.into(),
            qubits,
            dag,
            next_qubit_id,
        }
    }

    /// Replace the DAG, keeping name and register metadata.
    ///
    /// The new DAG must have the same qubits as the old one.
    pub fn with_dag(mut self, dag: CircuitDag) -> IrResult<Self> {
        let expected: Vec<_> = self.qubit_ids();
        let got: Vec<_> = dag.qubits().collect();
        if expected != got {
            return Err(IrError::InvalidDag(format!(
                "replacement DAG has {} qubits, circuit has {}",
                got.len(),
                expected.len()
            )));
        }
        self.dag = dag;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("oracle");
        let search = circuit.add_qreg("search", 3);
        let ancilla = circuit.add_qreg("ancilla", 2);

        assert_eq!(search, vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(ancilla, vec![QubitId(3), QubitId(4)]);
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(format!("{}", circuit.qubits()[4]), "ancilla[1]");
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .cp(PI / 2.0, QubitId(1), QubitId(0))
            .unwrap();

        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.num_ops(), 3);
    }

    #[test]
    fn test_mcx_operands() {
        let mut circuit = Circuit::with_size("test", 7);
        let controls: Vec<_> = (0..5).map(QubitId).collect();
        circuit
            .mcx_with_mode(&controls, QubitId(5), &[QubitId(6)], McxMode::Recursion)
            .unwrap();
        let inst = circuit.instructions().next().unwrap();
        assert_eq!(inst.qubits.len(), 7);
        assert_eq!(inst.qubits[5], QubitId(5));

        // Recursion with five controls needs exactly one ancilla.
        let err = circuit
            .mcx_with_mode(&controls, QubitId(5), &[], McxMode::Recursion)
            .unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { expected: 7, got: 6, .. }));

        assert!(matches!(
            circuit.mcx(&[], QubitId(0)),
            Err(IrError::NoControls)
        ));
    }

    #[test]
    fn test_compose_remaps_qubits() {
        let mut sub = Circuit::with_size("sub", 2);
        sub.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();

        let mut parent = Circuit::with_size("parent", 4);
        parent.compose(&sub, &[QubitId(3), QubitId(1)]).unwrap();

        let ops: Vec<_> = parent.instructions().cloned().collect();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].qubits, vec![QubitId(3)]);
        assert_eq!(ops[1].qubits, vec![QubitId(3), QubitId(1)]);
    }

    #[test]
    fn test_compose_width_mismatch() {
        let sub = Circuit::with_size("sub", 3);
        let mut parent = Circuit::with_size("parent", 4);
        let err = parent.compose(&sub, &[QubitId(0)]).unwrap_err();
        assert!(matches!(
            err,
            IrError::ComposeWidthMismatch { expected: 3, got: 1, .. }
        ));
    }

    #[test]
    fn test_failed_compose_leaves_circuit_unchanged() {
        let mut sub = Circuit::with_size("sub", 2);
        sub.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        let mut parent = Circuit::with_size("parent", 3);

        let err = parent.compose(&sub, &[QubitId(0), QubitId(9)]).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitNotFound { qubit: QubitId(9), .. }
        ));
        assert_eq!(parent.num_ops(), 0);

        let err = parent.compose(&sub, &[QubitId(2), QubitId(2)]).unwrap_err();
        assert!(matches!(
            err,
            IrError::DuplicateQubit { qubit: QubitId(2), .. }
        ));
        assert_eq!(parent.num_ops(), 0);
        assert_eq!(parent.depth(), 0);

        parent.compose(&sub, &[QubitId(2), QubitId(0)]).unwrap();
        assert_eq!(parent.num_ops(), 2);
    }

    #[test]
    fn test_inverse_reverses_and_inverts() {
        let mut circuit = Circuit::with_size("c", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .t(QubitId(1))
            .unwrap()
            .p(0.3, QubitId(0))
            .unwrap();

        let inv = circuit.inverse().unwrap();
        assert_eq!(inv.name(), "c_dg");
        let gates: Vec<_> = inv
            .instructions()
            .map(|i| i.as_standard().cloned().unwrap())
            .collect();
        assert_eq!(
            gates,
            vec![StandardGate::P(-0.3), StandardGate::Tdg, StandardGate::H]
        );
    }

    #[test]
    fn test_count_ops() {
        let mut circuit = Circuit::with_size("c", 2);
        circuit.h(QubitId(0)).unwrap().h(QubitId(1)).unwrap();
        circuit.barrier_labeled("init").unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts["h"], 2);
        assert_eq!(counts["barrier"], 1);
        assert_eq!(circuit.depth(), 1);
    }

    #[test]
    fn test_with_dag_keeps_registers() {
        let mut circuit = Circuit::new("named");
        circuit.add_qreg("search", 2);
        let dag = circuit.dag().clone();
        let rebuilt = circuit.clone().with_dag(dag).unwrap();
        assert_eq!(rebuilt.name(), "named");
        assert_eq!(rebuilt.qubits()[1].register.as_deref(), Some("search"));

        let wrong = Circuit::with_size("other", 3).into_dag();
        assert!(circuit.with_dag(wrong).is_err());
    }
}

//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, StandardGate};
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Barrier (synchronization point, adds no depth).
    Barrier {
        /// Optional label, e.g. the Grover stage it closes.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier { label: None },
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a labelled barrier instruction.
    pub fn labeled_barrier(
        label: impl Into<String>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> Self {
        Self {
            kind: InstructionKind::Barrier {
                label: Some(label.into()),
            },
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier { .. })
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            InstructionKind::Barrier { .. } => None,
        }
    }

    /// Get the standard gate if this is a gate instruction.
    pub fn as_standard(&self) -> Option<&StandardGate> {
        self.as_gate().map(|g| &g.kind)
    }

    /// Get the barrier label, if this is a labelled barrier.
    pub fn barrier_label(&self) -> Option<&str> {
        match &self.kind {
            InstructionKind::Barrier { label } => label.as_deref(),
            InstructionKind::Gate(_) => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Barrier { .. } => "barrier",
        }
    }

    /// Return the same operands with every qubit passed through `map`.
    #[must_use]
    pub fn remapped(&self, map: impl Fn(QubitId) -> QubitId) -> Self {
        Self {
            kind: self.kind.clone(),
            qubits: self.qubits.iter().map(|&q| map(q)).collect(),
        }
    }

    /// Return the inverse instruction. Barriers are their own inverse.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let kind = match &self.kind {
            InstructionKind::Gate(g) => InstructionKind::Gate(g.inverse()),
            barrier @ InstructionKind::Barrier { .. } => barrier.clone(),
        };
        Self {
            kind,
            qubits: self.qubits.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
    }

    #[test]
    fn test_barrier_instruction() {
        let inst = Instruction::labeled_barrier("oracle_1", [QubitId(0), QubitId(1), QubitId(2)]);
        assert!(inst.is_barrier());
        assert_eq!(inst.qubits.len(), 3);
        assert_eq!(inst.barrier_label(), Some("oracle_1"));
        assert_eq!(inst.name(), "barrier");
        assert!(Instruction::barrier([QubitId(0)]).barrier_label().is_none());
    }

    #[test]
    fn test_remap_and_inverse() {
        let inst = Instruction::two_qubit_gate(StandardGate::CP(0.25), QubitId(0), QubitId(1));
        let moved = inst.remapped(|q| QubitId(q.0 + 3));
        assert_eq!(moved.qubits, vec![QubitId(3), QubitId(4)]);

        let inv = inst.inverse();
        assert_eq!(inv.as_standard(), Some(&StandardGate::CP(-0.25)));
        assert_eq!(inv.qubits, inst.qubits);
    }
}

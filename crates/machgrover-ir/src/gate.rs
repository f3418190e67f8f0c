//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthesis strategy for a multi-controlled X gate.
///
/// The mode fixes how many ancilla operands the gate carries, and the
/// compiler uses it to pick a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McxMode {
    /// Gray-code decomposition with no ancillas.
    NoAncilla,
    /// Recursive halving around one dirty ancilla.
    #[default]
    Recursion,
    /// Toffoli ladder through `num_ctrl - 2` clean ancillas.
    VChain,
}

impl McxMode {
    /// Number of ancilla qubits this mode consumes for `num_ctrl` controls.
    pub fn num_ancillas(self, num_ctrl: u32) -> u32 {
        match self {
            McxMode::NoAncilla => 0,
            McxMode::Recursion => u32::from(num_ctrl > 4),
            McxMode::VChain => num_ctrl.saturating_sub(2),
        }
    }

    /// Short name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            McxMode::NoAncilla => "no_ancilla",
            McxMode::Recursion => "recursion",
            McxMode::VChain => "v_chain",
        }
    }
}

impl fmt::Display for McxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Z gate.
    Z,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Phase gate.
    P(f64),

    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Controlled phase gate.
    CP(f64),

    /// Toffoli gate (CCX).
    CCX,

    /// Multi-controlled X gate.
    ///
    /// Operands are the controls, then the target, then
    /// `mode.num_ancillas(num_ctrl)` ancillas.
    Mcx {
        /// Number of control qubits.
        num_ctrl: u32,
        /// Synthesis strategy.
        mode: McxMode,
    },
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Z => "z",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::CP(_) => "cp",
            StandardGate::CCX => "ccx",
            StandardGate::Mcx { .. } => "mcx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H
            | StandardGate::X
            | StandardGate::Z
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::P(_) => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::CP(_) => 2,

            StandardGate::CCX => 3,

            StandardGate::Mcx { num_ctrl, mode } => num_ctrl + 1 + mode.num_ancillas(*num_ctrl),
        }
    }

    /// Check if applying this gate twice is the identity.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            StandardGate::H
                | StandardGate::X
                | StandardGate::Z
                | StandardGate::CX
                | StandardGate::CZ
                | StandardGate::CCX
                | StandardGate::Mcx { .. }
        )
    }

    /// Get the inverse of this gate.
    pub fn inverse(&self) -> StandardGate {
        match self {
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::P(theta) => StandardGate::P(-theta),
            StandardGate::CP(theta) => StandardGate::CP(-theta),
            other => other.clone(),
        }
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The gate itself.
    pub kind: StandardGate,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: gate,
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Get the inverse of this gate, keeping the label.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            kind: self.kind.inverse(),
            label: self.label.clone(),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
        assert!(StandardGate::CZ.is_self_inverse());
        assert!(!StandardGate::T.is_self_inverse());
    }

    #[test]
    fn test_mcx_arity_follows_mode() {
        let noanc = StandardGate::Mcx {
            num_ctrl: 6,
            mode: McxMode::NoAncilla,
        };
        assert_eq!(noanc.num_qubits(), 7);

        let rec_small = StandardGate::Mcx {
            num_ctrl: 4,
            mode: McxMode::Recursion,
        };
        assert_eq!(rec_small.num_qubits(), 5);

        let rec_large = StandardGate::Mcx {
            num_ctrl: 5,
            mode: McxMode::Recursion,
        };
        assert_eq!(rec_large.num_qubits(), 7);

        let vchain = StandardGate::Mcx {
            num_ctrl: 5,
            mode: McxMode::VChain,
        };
        assert_eq!(vchain.num_qubits(), 9);
        assert_eq!(McxMode::VChain.num_ancillas(2), 0);
    }

    #[test]
    fn test_gate_inverse() {
        assert_eq!(StandardGate::T.inverse(), StandardGate::Tdg);
        assert_eq!(StandardGate::P(PI / 3.0).inverse(), StandardGate::P(-PI / 3.0));
        assert_eq!(StandardGate::CP(0.5).inverse(), StandardGate::CP(-0.5));
        assert_eq!(StandardGate::H.inverse(), StandardGate::H);

        let labeled = Gate::standard(StandardGate::T).with_label("phase");
        let inv = labeled.inverse();
        assert_eq!(inv.kind, StandardGate::Tdg);
        assert_eq!(inv.label.as_deref(), Some("phase"));
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&McxMode::VChain).unwrap();
        assert_eq!(json, "\"v_chain\"");
        let mode: McxMode = serde_json::from_str("\"no_ancilla\"").unwrap();
        assert_eq!(mode, McxMode::NoAncilla);
        assert_eq!(McxMode::default(), McxMode::Recursion);
    }
}

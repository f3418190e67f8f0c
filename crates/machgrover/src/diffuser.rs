//! Grover diffuser.
//!
//! The diffuser reflects about the uniform superposition `|s⟩`:
//!
//! ```text
//! D = H⊗n · X⊗n · MCZ · X⊗n · H⊗n
//! ```
//!
//! where `MCZ` flips the phase of `|1…1⟩`. For more than one qubit the MCZ is
//! realised as `H · MCX · H` on the last qubit, with the MCX synthesised
//! without ancillas so the diffuser never needs qubits outside the search
//! register.

use tracing::debug;

use machgrover_ir::{Circuit, QubitId};

use crate::error::{GroverError, GroverResult};

/// Build the diffuser over `n_qubits` qubits.
///
/// The circuit is named `diffuser_{n}q`. Barriers separate the phase flip
/// from the surrounding layers; they add no depth, so the logical depth is
/// 5 for one qubit and 7 otherwise.
///
/// # Errors
///
/// [`GroverError::InvalidQubitCount`] if `n_qubits` is zero.
///
/// # Example
///
/// ```
/// use machgrover::build_diffuser;
///
/// let diffuser = build_diffuser(4).unwrap();
/// assert_eq!(diffuser.name(), "diffuser_4q");
/// assert_eq!(diffuser.num_qubits(), 4);
/// assert_eq!(diffuser.depth(), 7);
/// ```
pub fn build_diffuser(n_qubits: u32) -> GroverResult<Circuit> {
    if n_qubits < 1 {
        return Err(GroverError::InvalidQubitCount {
            what: "diffuser qubit count",
            got: n_qubits,
        });
    }

    let mut circuit = Circuit::with_size(format!("diffuser_{n_qubits}q"), n_qubits);
    let qubits = circuit.qubit_ids();

    for &q in &qubits {
        circuit.h(q)?;
    }
    for &q in &qubits {
        circuit.x(q)?;
    }
    circuit.barrier_all()?;

    if n_qubits == 1 {
        circuit.z(QubitId(0))?;
    } else {
        let target = QubitId(n_qubits - 1);
        let controls = &qubits[..qubits.len() - 1];
        circuit.h(target)?;
        circuit.mcx(controls, target)?;
        circuit.h(target)?;
    }
    circuit.barrier_all()?;

    for &q in &qubits {
        circuit.x(q)?;
    }
    for &q in &qubits {
        circuit.h(q)?;
    }

    debug!(
        "Built {} with depth {} and {} ops",
        circuit.name(),
        circuit.depth(),
        circuit.num_ops()
    );
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_qubits_rejected() {
        assert!(matches!(
            build_diffuser(0),
            Err(GroverError::InvalidQubitCount { got: 0, .. })
        ));
    }

    #[test]
    fn test_single_qubit_uses_z() {
        let d = build_diffuser(1).unwrap();
        let names: Vec<_> = d.instructions().map(|i| i.name()).collect();
        assert_eq!(names, vec!["h", "x", "barrier", "z", "barrier", "x", "h"]);
        assert_eq!(d.depth(), 5);
    }

    #[test]
    fn test_mcx_targets_last_qubit() {
        let d = build_diffuser(3).unwrap();
        let mcx = d.instructions().find(|i| i.name() == "mcx").unwrap();
        assert_eq!(mcx.qubits, vec![QubitId(0), QubitId(1), QubitId(2)]);

        let counts = d.count_ops();
        assert_eq!(counts["h"], 8);
        assert_eq!(counts["x"], 6);
        assert_eq!(counts["barrier"], 2);
        assert_eq!(d.depth(), 7);
    }

    #[test]
    fn test_depth_is_constant_beyond_one_qubit() {
        for n in 2..=12 {
            assert_eq!(build_diffuser(n).unwrap().depth(), 7, "n = {n}");
        }
    }
}

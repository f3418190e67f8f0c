//! Test support for Machgrover.
//!
//! A small dense statevector evaluator, used only from test suites to check
//! that constructed and decomposed circuits do what their builders claim.
//! It is not a simulator API: there is no sampling, noise or measurement.

pub mod statevector;

pub use num_complex::Complex64;
pub use statevector::{MAX_QUBITS, Statevector};

use machgrover_ir::Circuit;

/// Tolerance used by the comparison helpers.
pub const TOLERANCE: f64 = 1e-9;

/// Run `circuit` on the basis state `|index⟩`.
pub fn run_from_basis(circuit: &Circuit, index: usize) -> Statevector {
    let mut sv = Statevector::basis(circuit.num_qubits(), index);
    sv.run(circuit);
    sv
}

/// Check that two states are equal amplitude by amplitude.
pub fn states_equal(a: &Statevector, b: &Statevector) -> bool {
    a.amplitudes().len() == b.amplitudes().len()
        && a
            .amplitudes()
            .iter()
            .zip(b.amplitudes())
            .all(|(x, y)| (x - y).norm() < TOLERANCE)
}

/// Check that two states are equal up to a global phase.
pub fn states_equal_up_to_phase(a: &Statevector, b: &Statevector) -> bool {
    a.amplitudes().len() == b.amplitudes().len() && (a.inner(b).norm() - 1.0).abs() < TOLERANCE
}

/// Check that two circuits act identically on every basis input in `inputs`.
///
/// Both circuits must have the same width. Phases are compared exactly,
/// so a relative phase between inputs is caught.
pub fn circuits_agree_on(
    a: &Circuit,
    b: &Circuit,
    inputs: impl IntoIterator<Item = usize>,
) -> bool {
    a.num_qubits() == b.num_qubits()
        && inputs
            .into_iter()
            .all(|i| states_equal(&run_from_basis(a, i), &run_from_basis(b, i)))
}

/// Check that two circuits are the same unitary up to one global phase.
///
/// The phase is fixed from input `|0⟩` and then required on every input.
pub fn circuits_equivalent(a: &Circuit, b: &Circuit) -> bool {
    if a.num_qubits() != b.num_qubits() {
        return false;
    }
    let size = 1usize << a.num_qubits();
    let mut phase: Option<Complex64> = None;
    for i in 0..size {
        let sa = run_from_basis(a, i);
        let sb = run_from_basis(b, i);
        let overlap = sa.inner(&sb);
        if (overlap.norm() - 1.0).abs() > TOLERANCE {
            return false;
        }
        match phase {
            None => phase = Some(overlap),
            Some(p) if (p - overlap).norm() > TOLERANCE => return false,
            Some(_) => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use machgrover_ir::QubitId;

    #[test]
    fn test_cz_matches_h_cx_h() {
        let mut cz = Circuit::with_size("cz", 2);
        cz.cz(QubitId(0), QubitId(1)).unwrap();

        let mut hcxh = Circuit::with_size("hcxh", 2);
        hcxh.h(QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .h(QubitId(1))
            .unwrap();

        assert!(circuits_agree_on(&cz, &hcxh, 0..4));
        assert!(circuits_equivalent(&cz, &hcxh));
    }

    #[test]
    fn test_relative_phase_is_detected() {
        let mut z = Circuit::with_size("z", 1);
        z.z(QubitId(0)).unwrap();
        let id = Circuit::with_size("id", 1);

        // Each basis input alone only differs by a phase.
        let s0 = run_from_basis(&z, 1);
        let s1 = run_from_basis(&id, 1);
        assert!(states_equal_up_to_phase(&s0, &s1));
        assert!(!states_equal(&s0, &s1));
        assert!(!circuits_equivalent(&z, &id));
    }
}

//! Statevector evaluation of circuits.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use machgrover_ir::{Circuit, Instruction, InstructionKind, StandardGate};

/// Largest register the evaluator accepts.
pub const MAX_QUBITS: usize = 16;

/// A statevector representing a quantum state.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self::basis(num_qubits, 0)
    }

    /// Create the computational basis state `|index⟩`.
    ///
    /// # Panics
    ///
    /// Panics if `num_qubits` exceeds [`MAX_QUBITS`] or `index` is out of range.
    pub fn basis(num_qubits: usize, index: usize) -> Self {
        assert!(
            num_qubits <= MAX_QUBITS,
            "statevector limited to {MAX_QUBITS} qubits, got {num_qubits}"
        );
        let size = 1 << num_qubits;
        assert!(index < size, "basis index {index} out of range for {num_qubits} qubits");
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Probability of measuring basis state `index`.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes[index].norm_sqr()
    }

    /// Inner product ⟨self|other⟩.
    pub fn inner(&self, other: &Statevector) -> Complex64 {
        self.amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum()
    }

    /// Apply every instruction of a circuit.
    pub fn run(&mut self, circuit: &Circuit) {
        for inst in circuit.instructions() {
            self.apply(inst);
        }
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.apply_standard_gate(&gate.kind, &qubits);
            }
            InstructionKind::Barrier { .. } => {}
        }
    }

    fn apply_standard_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::X => self.apply_mcx(&[], qubits[0]),
            StandardGate::Z => self.apply_mcphase(&[], qubits[0], std::f64::consts::PI),
            StandardGate::T => self.apply_mcphase(&[], qubits[0], std::f64::consts::FRAC_PI_4),
            StandardGate::Tdg => self.apply_mcphase(&[], qubits[0], -std::f64::consts::FRAC_PI_4),
            StandardGate::P(theta) => self.apply_mcphase(&[], qubits[0], *theta),
            StandardGate::CX => self.apply_mcx(&qubits[..1], qubits[1]),
            StandardGate::CZ => self.apply_mcphase(&qubits[..1], qubits[1], std::f64::consts::PI),
            StandardGate::CP(theta) => self.apply_mcphase(&qubits[..1], qubits[1], *theta),
            StandardGate::CCX => self.apply_mcx(&qubits[..2], qubits[2]),
            StandardGate::Mcx { num_ctrl, .. } => {
                // Logical semantics: ancilla operands are untouched.
                let k = *num_ctrl as usize;
                self.apply_mcx(&qubits[..k], qubits[k]);
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                self.amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
    }

    /// Flip `target` on every basis state where all `controls` are set.
    fn apply_mcx(&mut self, controls: &[usize], target: usize) {
        let ctrl_mask = controls.iter().fold(0usize, |m, &c| m | (1 << c));
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    /// Multiply by `e^{iθ}` every basis state where controls and target are set.
    fn apply_mcphase(&mut self, controls: &[usize], target: usize, theta: f64) {
        let mask = controls.iter().fold(1usize << target, |m, &c| m | (1 << c));
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp *= phase;
            }
        }
    }
}

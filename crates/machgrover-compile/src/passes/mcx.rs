//! Multi-controlled X synthesis.
//!
//! Lowers every [`StandardGate::Mcx`] to H, CX, CCX and controlled-phase
//! gates. Which construction is used depends on the gate's [`McxMode`]:
//!
//! | Mode | Ancillas | Construction |
//! |------|----------|--------------|
//! | `NoAncilla` | 0 | `H · MCP(π) · H`, MCP built by Gray-code walk |
//! | `Recursion` | 1 dirty (k > 4) | split controls in halves around the ancilla |
//! | `VChain` | k − 2 clean | Toffoli ladder compute / uncompute |
//!
//! One or two controls always become CX or CCX.

use std::f64::consts::PI;

use tracing::debug;

use machgrover_ir::{CircuitDag, Instruction, McxMode, QubitId, StandardGate};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{PropertySet, SynthesisStats};

/// Largest control count the Gray-code construction accepts.
///
/// The walk emits about `2^(k+1)` gates.
pub const MAX_GRAY_CODE_CONTROLS: usize = 24;

/// Gray-code construction is used directly up to this many controls when
/// recursing.
const RECURSION_BASE_CONTROLS: usize = 4;

/// Multi-controlled X synthesis pass.
pub struct McxSynthesis;

impl Pass for McxSynthesis {
    fn name(&self) -> &'static str {
        "McxSynthesis"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let mut new_dag = CircuitDag::new();
        for qubit in dag.qubits().collect::<Vec<_>>() {
            new_dag.add_qubit(qubit);
        }

        let mut stats = properties.remove::<SynthesisStats>().unwrap_or_default();
        for (_idx, inst) in dag.topological_ops() {
            if let Some(StandardGate::Mcx { num_ctrl, mode }) = inst.as_standard() {
                let k = *num_ctrl as usize;
                let controls = &inst.qubits[..k];
                let target = inst.qubits[k];
                let ancillas = &inst.qubits[k + 1..];
                let replacement = synthesize_mcx(controls, target, ancillas, *mode)?;
                debug!(
                    "Lowered {}-control mcx ({mode}) into {} gates",
                    k,
                    replacement.len()
                );
                stats.mcx_lowered += 1;
                stats.ops_emitted += replacement.len();
                for r in replacement {
                    new_dag.apply(r)?;
                }
                continue;
            }
            new_dag.apply(inst.clone())?;
        }
        properties.insert(stats);

        *dag = new_dag;
        Ok(())
    }

    fn should_run(&self, dag: &CircuitDag, _properties: &PropertySet) -> bool {
        dag.topological_ops()
            .any(|(_, inst)| matches!(inst.as_standard(), Some(StandardGate::Mcx { .. })))
    }
}

/// Synthesize a multi-controlled X into elementary gates.
///
/// `ancillas` must hold exactly the number of qubits `mode` consumes for
/// `controls.len()` controls.
pub fn synthesize_mcx(
    controls: &[QubitId],
    target: QubitId,
    ancillas: &[QubitId],
    mode: McxMode,
) -> CompileResult<Vec<Instruction>> {
    let k = controls.len();
    if k == 0 {
        return Err(machgrover_ir::IrError::NoControls.into());
    }
    let expected = mode.num_ancillas(u32::try_from(k).unwrap_or(u32::MAX)) as usize;
    if ancillas.len() != expected {
        return Err(CompileError::AncillaMismatch {
            num_ctrl: k,
            mode,
            expected,
            got: ancillas.len(),
        });
    }

    let mut out = Emitter::default();
    match mode {
        _ if k <= 2 => out.small_mcx(controls, target),
        McxMode::NoAncilla => out.mcx_gray_code(controls, target)?,
        McxMode::Recursion => out.mcx_recursive(controls, target, ancillas)?,
        McxMode::VChain => out.mcx_v_chain(controls, target, ancillas),
    }
    Ok(out.ops)
}

/// Accumulates the emitted gate sequence.
#[derive(Default)]
struct Emitter {
    ops: Vec<Instruction>,
}

impl Emitter {
    fn h(&mut self, q: QubitId) {
        self.ops.push(Instruction::single_qubit_gate(StandardGate::H, q));
    }

    fn cx(&mut self, c: QubitId, t: QubitId) {
        self.ops.push(Instruction::two_qubit_gate(StandardGate::CX, c, t));
    }

    fn cp(&mut self, lambda: f64, c: QubitId, t: QubitId) {
        self.ops
            .push(Instruction::two_qubit_gate(StandardGate::CP(lambda), c, t));
    }

    fn ccx(&mut self, c1: QubitId, c2: QubitId, t: QubitId) {
        self.ops
            .push(Instruction::gate(StandardGate::CCX, [c1, c2, t]));
    }

    /// One or two controls.
    fn small_mcx(&mut self, controls: &[QubitId], target: QubitId) {
        match controls {
            [c] => self.cx(*c, target),
            [c1, c2] => self.ccx(*c1, *c2, target),
            _ => unreachable!("small_mcx takes one or two controls"),
        }
    }

    fn mcx_gray_code(&mut self, controls: &[QubitId], target: QubitId) -> CompileResult<()> {
        self.h(target);
        self.mcp_gray_code(PI, controls, target)?;
        self.h(target);
        Ok(())
    }

    /// Multi-controlled phase by walking the Gray code over the controls.
    ///
    /// At step `i` the control at the highest set bit of `gray(i)` holds the
    /// parity of the controls selected by `gray(i)`; a controlled phase of
    /// `±λ/2^(k-1)` is applied from it, signed by the subset size. The
    /// controls hold their original values again after the last step.
    fn mcp_gray_code(
        &mut self,
        lambda: f64,
        controls: &[QubitId],
        target: QubitId,
    ) -> CompileResult<()> {
        let k = controls.len();
        if k > MAX_GRAY_CODE_CONTROLS {
            return Err(CompileError::CircuitTooLarge {
                num_ctrl: k,
                max: MAX_GRAY_CODE_CONTROLS,
            });
        }
        let step = lambda / f64::from(1u32 << (k - 1));

        let mut last: Option<usize> = None;
        for i in 1..(1usize << k) {
            let pattern = i ^ (i >> 1);
            let hi = (usize::BITS - 1 - pattern.leading_zeros()) as usize;
            if let Some(last) = last {
                let changed = (pattern ^ last).trailing_zeros() as usize;
                if changed == hi {
                    for b in (0..hi).filter(|b| pattern & (1 << b) != 0) {
                        self.cx(controls[b], controls[hi]);
                    }
                } else {
                    self.cx(controls[changed], controls[hi]);
                }
            }
            let sign = if pattern.count_ones() % 2 == 1 { 1.0 } else { -1.0 };
            self.cp(sign * step, controls[hi], target);
            last = Some(pattern);
        }
        Ok(())
    }

    /// Recursive halving around one dirty ancilla.
    ///
    /// `pool` lists qubits outside this gate's operands that may be borrowed
    /// in any state; each is returned unchanged.
    fn mcx_recursive(
        &mut self,
        controls: &[QubitId],
        target: QubitId,
        pool: &[QubitId],
    ) -> CompileResult<()> {
        let k = controls.len();
        if k <= 2 {
            self.small_mcx(controls, target);
            return Ok(());
        }
        let Some((&anc, rest)) = pool.split_first() else {
            return self.mcx_gray_code(controls, target);
        };
        if k <= RECURSION_BASE_CONTROLS {
            return self.mcx_gray_code(controls, target);
        }

        let mid = k / 2;
        let first = &controls[..mid];
        let mut second = controls[mid..].to_vec();
        second.push(anc);

        let mut pool_first: Vec<_> = controls[mid..].to_vec();
        pool_first.push(target);
        pool_first.extend_from_slice(rest);

        let mut pool_second: Vec<_> = first.to_vec();
        pool_second.extend_from_slice(rest);

        // anc ^= AND(first); target ^= AND(second)·anc; twice, which cancels
        // the unknown starting value of anc.
        for _ in 0..2 {
            self.mcx_recursive(first, anc, &pool_first)?;
            self.mcx_recursive(&second, target, &pool_second)?;
        }
        Ok(())
    }

    /// Toffoli ladder through clean ancillas.
    fn mcx_v_chain(&mut self, controls: &[QubitId], target: QubitId, ancillas: &[QubitId]) {
        let k = controls.len();
        self.ccx(controls[0], controls[1], ancillas[0]);
        for i in 2..k - 1 {
            self.ccx(controls[i], ancillas[i - 2], ancillas[i - 1]);
        }
        self.ccx(controls[k - 1], ancillas[k - 3], target);
        for i in (2..k - 1).rev() {
            self.ccx(controls[i], ancillas[i - 2], ancillas[i - 1]);
        }
        self.ccx(controls[0], controls[1], ancillas[0]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qubits(range: std::ops::Range<u32>) -> Vec<QubitId> {
        range.map(QubitId).collect()
    }

    fn names(ops: &[Instruction]) -> Vec<&str> {
        ops.iter().map(Instruction::name).collect()
    }

    #[test]
    fn test_small_control_counts() {
        let one = synthesize_mcx(&qubits(0..1), QubitId(1), &[], McxMode::NoAncilla).unwrap();
        assert_eq!(names(&one), vec!["cx"]);

        let two = synthesize_mcx(&qubits(0..2), QubitId(2), &[], McxMode::VChain).unwrap();
        assert_eq!(names(&two), vec!["ccx"]);
    }

    #[test]
    fn test_gray_code_gate_counts() {
        // k controls: 2^k - 1 phases, 2^k - 2 parity CXs, two Hadamards.
        for k in 3..=6u32 {
            let ops =
                synthesize_mcx(&qubits(0..k), QubitId(k), &[], McxMode::NoAncilla).unwrap();
            let phases = ops.iter().filter(|i| i.name() == "cp").count();
            let parities = ops.iter().filter(|i| i.name() == "cx").count();
            assert_eq!(phases, (1 << k) - 1);
            assert_eq!(parities, (1 << k) - 2);
            assert_eq!(ops.first().unwrap().name(), "h");
            assert_eq!(ops.last().unwrap().name(), "h");
        }
    }

    #[test]
    fn test_v_chain_toffoli_count() {
        let ops = synthesize_mcx(&qubits(0..5), QubitId(5), &qubits(6..9), McxMode::VChain)
            .unwrap();
        assert!(ops.iter().all(|i| i.name() == "ccx"));
        assert_eq!(ops.len(), 2 * (5 - 2) + 1);
    }

    #[test]
    fn test_recursion_without_ancilla_for_four_controls() {
        let rec = synthesize_mcx(&qubits(0..4), QubitId(4), &[], McxMode::Recursion).unwrap();
        let gray = synthesize_mcx(&qubits(0..4), QubitId(4), &[], McxMode::NoAncilla).unwrap();
        assert_eq!(rec, gray);
    }

    #[test]
    fn test_ancilla_mismatch() {
        let err = synthesize_mcx(&qubits(0..5), QubitId(5), &[], McxMode::VChain).unwrap_err();
        assert!(matches!(
            err,
            CompileError::AncillaMismatch {
                expected: 3,
                got: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_pass_records_stats() {
        let mut circuit = machgrover_ir::Circuit::with_size("t", 4);
        circuit
            .mcx(&qubits(0..3), QubitId(3))
            .unwrap()
            .h(QubitId(0))
            .unwrap();
        let mut dag = circuit.into_dag();
        let mut props = PropertySet::new();

        assert!(McxSynthesis.should_run(&dag, &props));
        McxSynthesis.run(&mut dag, &mut props).unwrap();
        assert!(!McxSynthesis.should_run(&dag, &props));

        let stats = props.get::<SynthesisStats>().unwrap();
        assert_eq!(stats.mcx_lowered, 1);
        assert_eq!(dag.num_ops(), stats.ops_emitted + 1);
        dag.verify_integrity().unwrap();
    }
}

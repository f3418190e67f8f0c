//! Toffoli expansion to Clifford+T.

use machgrover_ir::{CircuitDag, Instruction, QubitId, StandardGate};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Replaces every CCX with the standard 15-gate H/CX/T/Tdg network.
///
/// Runs only when [`PropertySet::expand_toffoli`] is set.
pub struct ToffoliExpansion;

impl Pass for ToffoliExpansion {
    fn name(&self) -> &'static str {
        "ToffoliExpansion"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, _properties: &mut PropertySet) -> CompileResult<()> {
        let mut new_dag = CircuitDag::new();
        for qubit in dag.qubits().collect::<Vec<_>>() {
            new_dag.add_qubit(qubit);
        }

        for (_idx, inst) in dag.topological_ops() {
            if let (Some(StandardGate::CCX), [a, b, c]) = (inst.as_standard(), &inst.qubits[..]) {
                for r in expand_ccx(*a, *b, *c) {
                    new_dag.apply(r)?;
                }
                continue;
            }
            new_dag.apply(inst.clone())?;
        }

        *dag = new_dag;
        Ok(())
    }

    fn should_run(&self, _dag: &CircuitDag, properties: &PropertySet) -> bool {
        properties.expand_toffoli
    }
}

/// Expand `CCX(a, b, c)` into Clifford+T gates.
pub fn expand_ccx(a: QubitId, b: QubitId, c: QubitId) -> Vec<Instruction> {
    use StandardGate::{CX, H, T, Tdg};
    let one = Instruction::single_qubit_gate;
    let two = Instruction::two_qubit_gate;
    vec![
        one(H, c),
        two(CX, b, c),
        one(Tdg, c),
        two(CX, a, c),
        one(T, c),
        two(CX, b, c),
        one(Tdg, c),
        two(CX, a, c),
        one(T, b),
        one(T, c),
        one(H, c),
        two(CX, a, b),
        one(T, a),
        one(Tdg, b),
        two(CX, a, b),
    ]
}

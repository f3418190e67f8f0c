//! Cancellation of adjacent self-inverse gates.

use rustc_hash::FxHashMap;
use tracing::debug;

use machgrover_ir::{CircuitDag, Instruction, QubitId};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::{CancellationStats, PropertySet};

/// Removes pairs of identical self-inverse gates that are adjacent on
/// every wire they touch.
///
/// `H·H`, `X·X`, `CX·CX` (same control and target), `CCX·CCX` and
/// `MCX·MCX` all reduce to the identity. Removing a pair can expose a new
/// one (`X H H X`), so cancellation cascades in a single sweep. Barriers
/// are never removed and block cancellation across them.
pub struct CancelInversePairs;

impl CancelInversePairs {
    /// Return the kept instructions, in order.
    fn cancel(ops: Vec<Instruction>) -> (Vec<Instruction>, usize) {
        let mut kept: Vec<Option<Instruction>> = Vec::with_capacity(ops.len());
        let mut fronts: FxHashMap<QubitId, Vec<usize>> = FxHashMap::default();
        let mut removed = 0;

        for inst in ops {
            if let Some(partner) = Self::cancelling_partner(&inst, &kept, &fronts) {
                for q in &inst.qubits {
                    if let Some(stack) = fronts.get_mut(q) {
                        stack.pop();
                    }
                }
                kept[partner] = None;
                removed += 2;
                continue;
            }
            let idx = kept.len();
            for q in &inst.qubits {
                fronts.entry(*q).or_default().push(idx);
            }
            kept.push(Some(inst));
        }

        (kept.into_iter().flatten().collect(), removed)
    }

    /// The index of the kept instruction `inst` would cancel against.
    fn cancelling_partner(
        inst: &Instruction,
        kept: &[Option<Instruction>],
        fronts: &FxHashMap<QubitId, Vec<usize>>,
    ) -> Option<usize> {
        if !inst.as_standard().is_some_and(|g| g.is_self_inverse()) {
            return None;
        }
        let mut partner = None;
        for q in &inst.qubits {
            let top = *fronts.get(q)?.last()?;
            match partner {
                None => partner = Some(top),
                Some(p) if p != top => return None,
                Some(_) => {}
            }
        }
        let partner = partner?;
        (kept[partner].as_ref() == Some(inst)).then_some(partner)
    }
}

impl Pass for CancelInversePairs {
    fn name(&self) -> &'static str {
        "CancelInversePairs"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let ops: Vec<_> = dag.topological_ops().map(|(_, i)| i.clone()).collect();
        let (kept, removed) = Self::cancel(ops);
        if removed == 0 {
            return Ok(());
        }
        debug!("Cancelled {} self-inverse gates", removed);

        let mut new_dag = CircuitDag::new();
        for qubit in dag.qubits().collect::<Vec<_>>() {
            new_dag.add_qubit(qubit);
        }
        for inst in kept {
            new_dag.apply(inst)?;
        }
        *dag = new_dag;

        let mut stats = properties
            .remove::<CancellationStats>()
            .unwrap_or_default();
        stats.removed += removed;
        properties.insert(stats);
        Ok(())
    }
}

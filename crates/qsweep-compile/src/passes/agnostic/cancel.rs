//! Cancellation of adjacent inverse gate pairs.

use qsweep_ir::{CircuitDag, Instruction, QubitId, StandardGate};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::property::PropertySet;

const EPSILON: f64 = 1e-9;

/// Removes pairs of gates that multiply to the identity.
///
/// Two gates cancel when they act on the same qubits, nothing else touches
/// those qubits between them, and the second is the inverse of the first
/// (`h·h`, `cx·cx`, `s·sdg`, `rz(a)·rz(-a)`, ...). Removing a pair can expose
/// a new one, so `x h h x` vanishes entirely. Measurements, resets and
/// barriers are never removed and block cancellation across them.
pub struct CancelInverses;

impl Pass for CancelInverses {
    fn name(&self) -> &'static str {
        "CancelInverses"
    }

    fn run(&self, dag: &mut CircuitDag, _properties: &mut PropertySet) -> CompileResult<()> {
        let mut kept: Vec<Option<Instruction>> = Vec::with_capacity(dag.num_ops());
        // Indices into `kept` of the live operations on each wire, oldest first.
        let mut wires: FxHashMap<QubitId, Vec<usize>> = FxHashMap::default();
        let mut removed = 0;

        for inst in dag.instructions() {
            if let Some(prev) = cancelling_partner(&inst, &kept, &wires) {
                for q in &inst.qubits {
                    if let Some(stack) = wires.get_mut(q) {
                        stack.pop();
                    }
                }
                kept[prev] = None;
                removed += 2;
                continue;
            }

            let idx = kept.len();
            for &q in &inst.qubits {
                wires.entry(q).or_default().push(idx);
            }
            kept.push(Some(inst));
        }

        if removed > 0 {
            debug!(removed, "cancelled inverse gates");
            *dag = dag.rebuild(kept.into_iter().flatten())?;
        }
        Ok(())
    }
}

/// Index of the operation `inst` cancels against, if any.
fn cancelling_partner(
    inst: &Instruction,
    kept: &[Option<Instruction>],
    wires: &FxHashMap<QubitId, Vec<usize>>,
) -> Option<usize> {
    let gate = inst.as_gate()?;
    let first = *wires.get(inst.qubits.first()?)?.last()?;
    for q in &inst.qubits[1..] {
        if wires.get(q)?.last() != Some(&first) {
            return None;
        }
    }

    let prev = kept[first].as_ref()?;
    let prev_gate = prev.as_gate()?;
    if prev.qubits.len() != inst.qubits.len() {
        return None;
    }
    let same_operands = prev.qubits == inst.qubits
        || (is_symmetric(gate) && prev.qubits.iter().rev().eq(inst.qubits.iter()));

    (same_operands && is_inverse_pair(prev_gate, gate)).then_some(first)
}

fn is_symmetric(gate: &StandardGate) -> bool {
    matches!(gate, StandardGate::CZ | StandardGate::Swap | StandardGate::RZZ(_))
}

fn is_inverse_pair(a: &StandardGate, b: &StandardGate) -> bool {
    let inv = a.inverse();
    inv.name() == b.name()
        && inv
            .params()
            .iter()
            .zip(b.params())
            .all(|(x, y)| (x - y).abs() < EPSILON)
}

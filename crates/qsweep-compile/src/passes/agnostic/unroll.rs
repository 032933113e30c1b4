//! Expansion of gates acting on three or more qubits.

use qsweep_ir::{CircuitDag, StandardGate};

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::target::translation::ccx_decomposition;
use crate::property::PropertySet;

/// Replaces every Toffoli with its one- and two-qubit equivalent so that
/// routing only ever sees two-qubit interactions.
pub struct Unroll3q;

impl Pass for Unroll3q {
    fn name(&self) -> &'static str {
        "Unroll3q"
    }

    fn run(&self, dag: &mut CircuitDag, _properties: &mut PropertySet) -> CompileResult<()> {
        let mut unrolled = Vec::with_capacity(dag.num_ops());
        for inst in dag.instructions() {
            if let (Some(StandardGate::CCX), &[a, b, c]) =
                (inst.as_gate(), inst.qubits.as_slice())
            {
                unrolled.extend(ccx_decomposition(a, b, c));
                continue;
            }
            unrolled.push(inst);
        }
        *dag = dag.rebuild(unrolled)?;
        Ok(())
    }

    fn is_needed(&self, dag: &CircuitDag, _properties: &PropertySet) -> bool {
        dag.topological_ops().any(|(_, inst)| inst.qubits.len() > 2 && inst.is_gate())
    }
}

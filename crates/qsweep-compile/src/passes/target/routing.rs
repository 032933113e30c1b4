//! SWAP insertion for two-qubit gates on non-adjacent qubits.

use qsweep_ir::{CircuitDag, Instruction, QubitId, StandardGate};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;
use crate::property::{Layout, PropertySet};

/// Number of SWAPs the last routing run inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoutingStats {
    pub swaps_inserted: usize,
}

/// Greedy shortest-path routing.
///
/// Walks the circuit in order. Before each two-qubit gate whose operands are
/// not adjacent on the coupling map, SWAPs move the first operand along a
/// shortest path until it neighbours the second. The layout tracks where each
/// logical qubit currently lives, and every operation is rewritten onto
/// physical wires.
///
/// The DAG needs a wire for every physical qubit a path can cross;
/// [`crate::transpile`] pads circuits to the coupling-map size first.
/// Gates on three or more qubits must be unrolled beforehand.
pub struct BasicRouting;

impl Pass for BasicRouting {
    fn name(&self) -> &'static str {
        "BasicRouting"
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let coupling_map = properties
            .coupling_map
            .as_ref()
            .ok_or(CompileError::MissingCouplingMap)?;
        let layout = properties
            .layout
            .as_mut()
            .ok_or(CompileError::MissingLayout)?;

        let mut routed = Vec::with_capacity(dag.num_ops());
        let mut swaps_inserted = 0;

        for instruction in dag.instructions() {
            if instruction.is_gate() && instruction.qubits.len() == 2 {
                let p0 = physical(layout, instruction.qubits[0])?;
                let p1 = physical(layout, instruction.qubits[1])?;

                if !coupling_map.is_connected(p0, p1) {
                    let path = coupling_map
                        .shortest_path(p0, p1)
                        .ok_or(CompileError::Unroutable { from: p0, to: p1 })?;

                    // The last hop is the gate itself.
                    for hop in path[..path.len() - 1].windows(2) {
                        routed.push(Instruction::two_qubit_gate(
                            StandardGate::Swap,
                            QubitId(hop[0]),
                            QubitId(hop[1]),
                        ));
                        layout.swap_physical(hop[0], hop[1]);
                        swaps_inserted += 1;
                    }
                }
            }

            let qubits = instruction
                .qubits
                .iter()
                .map(|&q| physical(layout, q).map(QubitId))
                .collect::<CompileResult<Vec<_>>>()?;
            routed.push(Instruction {
                qubits,
                ..instruction
            });
        }

        debug!(swaps_inserted, "routing complete");
        *dag = dag.rebuild(routed)?;
        properties.insert(RoutingStats { swaps_inserted });
        Ok(())
    }

    fn is_needed(&self, _dag: &CircuitDag, properties: &PropertySet) -> bool {
        properties.coupling_map.is_some() && properties.layout.is_some()
    }
}

fn physical(layout: &Layout, qubit: QubitId) -> CompileResult<u32> {
    layout
        .physical(qubit)
        .ok_or(CompileError::MissingLayout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::TrivialLayout;
    use crate::target::CouplingMap;
    use qsweep_ir::Circuit;

    fn routed(circuit: Circuit, map: CouplingMap) -> (CircuitDag, PropertySet) {
        let mut dag = circuit.into_dag();
        let mut props = PropertySet::new();
        props.coupling_map = Some(map);
        TrivialLayout.run(&mut dag, &mut props).unwrap();
        BasicRouting.run(&mut dag, &mut props).unwrap();
        (dag, props)
    }

    #[test]
    fn test_adjacent_gate_untouched() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        let (dag, props) = routed(circuit, CouplingMap::linear(2));
        assert_eq!(dag.num_ops(), 2);
        assert_eq!(props.get::<RoutingStats>().unwrap().swaps_inserted, 0);
    }

    #[test]
    fn test_swap_inserted_before_gate() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();

        let (dag, props) = routed(circuit, CouplingMap::linear(3));
        let ops = dag.instructions();

        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].name(), "swap");
        assert_eq!(ops[0].qubits, vec![QubitId(0), QubitId(1)]);
        assert_eq!(ops[1].name(), "cx");
        assert_eq!(ops[1].qubits, vec![QubitId(1), QubitId(2)]);

        let layout = props.layout.as_ref().unwrap();
        assert_eq!(layout.physical(QubitId(0)), Some(1));
        assert_eq!(layout.physical(QubitId(1)), Some(0));
    }

    #[test]
    fn test_later_ops_follow_moved_qubits() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        circuit.x(QubitId(0)).unwrap();

        let (dag, _) = routed(circuit, CouplingMap::linear(3));
        let last = dag.instructions().pop().unwrap();
        assert_eq!(last.name(), "x");
        assert_eq!(last.qubits, vec![QubitId(1)]);
    }

    #[test]
    fn test_unreachable_qubits_fail() {
        let mut circuit = Circuit::with_size("test", 4, 0);
        circuit.cx(QubitId(0), QubitId(3)).unwrap();

        let map = CouplingMap::with_edges(4, [(0, 1), (2, 3)]);

        let mut dag = circuit.into_dag();
        let mut props = PropertySet::new();
        props.coupling_map = Some(map);
        TrivialLayout.run(&mut dag, &mut props).unwrap();

        assert!(matches!(
            BasicRouting.run(&mut dag, &mut props),
            Err(CompileError::Unroutable { from: 0, to: 3 })
        ));
    }
}

//! Wire-level dependency graph of a circuit.

use petgraph::Direction;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

pub type NodeIndex = petgraph::graph::NodeIndex<u32>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DagNode {
    /// Start of a wire.
    In(WireId),
    /// End of a wire.
    Out(WireId),
    Op(Instruction),
}

impl DagNode {
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            DagNode::In(_) | DagNode::Out(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WireId {
    Qubit(QubitId),
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

#[derive(Debug, Clone, Copy)]
struct WireEnds {
    input: NodeIndex,
    output: NodeIndex,
    /// Most recent node on the wire, `input` while the wire is empty.
    last: NodeIndex,
}

/// A circuit as a graph: one `In`/`Out` node pair per wire, one `Op` node per
/// instruction, and an edge labelled with the wire between consecutive nodes
/// on that wire.
///
/// The graph only grows. Rewrites go through [`rebuild`](Self::rebuild),
/// which replays a new instruction list onto fresh wires, so `Op` node
/// indices always increase in application order and iteration is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<DagNode, WireId, u32>,
    wires: FxHashMap<WireId, WireEnds>,
    num_qubits: usize,
    num_clbits: usize,
}

impl CircuitDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// No-op if the qubit already has a wire.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        if self.add_wire(WireId::Qubit(qubit)) {
            self.num_qubits += 1;
        }
    }

    /// No-op if the clbit already has a wire.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        if self.add_wire(WireId::Clbit(clbit)) {
            self.num_clbits += 1;
        }
    }

    fn add_wire(&mut self, wire: WireId) -> bool {
        if self.wires.contains_key(&wire) {
            return false;
        }
        let input = self.graph.add_node(DagNode::In(wire));
        let output = self.graph.add_node(DagNode::Out(wire));
        self.graph.add_edge(input, output, wire);
        self.wires.insert(
            wire,
            WireEnds {
                input,
                output,
                last: input,
            },
        );
        true
    }

    /// Append `instruction` after the current last node of each wire it uses.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        self.check(&instruction)?;

        let touched: Vec<WireId> = instruction
            .qubits
            .iter()
            .copied()
            .map(WireId::from)
            .chain(instruction.clbits.iter().copied().map(WireId::from))
            .collect();
        let node = self.graph.add_node(DagNode::Op(instruction));

        for wire in touched {
            let ends = self
                .wires
                .get_mut(&wire)
                .ok_or_else(|| IrError::MalformedDag(format!("no wire {wire:?}")))?;
            let tail = self
                .graph
                .find_edge(ends.last, ends.output)
                .ok_or_else(|| IrError::MalformedDag(format!("{wire:?} lost its output edge")))?;
            self.graph.remove_edge(tail);
            self.graph.add_edge(ends.last, node, wire);
            self.graph.add_edge(node, ends.output, wire);
            ends.last = node;
        }

        Ok(node)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn check(&self, instruction: &Instruction) -> IrResult<()> {
        let op = instruction.name();
        let qubits = &instruction.qubits;
        let clbits = &instruction.clbits;

        match &instruction.kind {
            InstructionKind::Gate(gate) if gate.num_qubits() as usize != qubits.len() => {
                return Err(IrError::WrongArity {
                    op,
                    expected: gate.num_qubits(),
                    got: qubits.len() as u32,
                });
            }
            InstructionKind::Measure if qubits.len() != clbits.len() => {
                return Err(IrError::MeasureArity {
                    qubits: qubits.len(),
                    clbits: clbits.len(),
                });
            }
            _ => {}
        }

        let mut seen = FxHashSet::default();
        for &qubit in qubits {
            if !self.wires.contains_key(&WireId::Qubit(qubit)) {
                return Err(IrError::UnknownQubit { qubit, op });
            }
            if !seen.insert(qubit) {
                return Err(IrError::RepeatedQubit { qubit, op });
            }
        }
        match clbits
            .iter()
            .find(|&&c| !self.wires.contains_key(&WireId::Clbit(c)))
        {
            Some(&clbit) => Err(IrError::UnknownClbit { clbit, op }),
            None => Ok(()),
        }
    }

    /// Operations in application order, which is also a topological order.
    pub fn topological_ops(&self) -> impl Iterator<Item = (NodeIndex, &Instruction)> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph[idx].instruction().map(|inst| (idx, inst)))
    }

    pub fn instructions(&self) -> Vec<Instruction> {
        self.topological_ops().map(|(_, inst)| inst.clone()).collect()
    }

    /// Same wires, new body.
    pub fn rebuild(&self, instructions: impl IntoIterator<Item = Instruction>) -> IrResult<Self> {
        let mut dag = CircuitDag::new();
        self.qubits().into_iter().for_each(|q| dag.add_qubit(q));
        self.clbits().into_iter().for_each(|c| dag.add_clbit(c));
        for inst in instructions {
            dag.apply(inst)?;
        }
        Ok(dag)
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    #[inline]
    pub fn num_ops(&self) -> usize {
        self.graph.node_count() - 2 * self.wires.len()
    }

    /// Operation counts keyed by instruction name.
    pub fn count_ops(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for (_, inst) in self.topological_ops() {
            *counts.entry(inst.name()).or_default() += 1;
        }
        counts
    }

    /// Operations on the longest path. Barriers count as operations.
    pub fn depth(&self) -> usize {
        let mut layer = vec![0usize; self.graph.node_count()];
        let mut deepest = 0;
        for (node, _) in self.topological_ops() {
            let d = 1 + self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|prev| layer[prev.index()])
                .max()
                .unwrap_or(0);
            layer[node.index()] = d;
            deepest = deepest.max(d);
        }
        deepest
    }

    /// Sorted by index.
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<QubitId> = self
            .wires
            .keys()
            .filter_map(|w| match w {
                WireId::Qubit(q) => Some(*q),
                WireId::Clbit(_) => None,
            })
            .collect();
        qubits.sort_unstable();
        qubits
    }

    /// Sorted by index.
    pub fn clbits(&self) -> Vec<ClbitId> {
        let mut clbits: Vec<ClbitId> = self
            .wires
            .keys()
            .filter_map(|w| match w {
                WireId::Clbit(c) => Some(*c),
                WireId::Qubit(_) => None,
            })
            .collect();
        clbits.sort_unstable();
        clbits
    }

    /// Check that the graph has no cycle and each wire is one unbroken chain
    /// from its `In` node to its `Out` node.
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::MalformedDag("cycle in circuit graph".into()));
        }

        for (&wire, ends) in &self.wires {
            let mut at = ends.input;
            let mut steps = 0;
            while at != ends.output {
                if steps > self.graph.node_count() {
                    return Err(IrError::MalformedDag(format!("{wire:?} does not terminate")));
                }
                at = self
                    .graph
                    .edges_directed(at, Direction::Outgoing)
                    .find(|e| *e.weight() == wire)
                    .map(|e| e.target())
                    .ok_or_else(|| IrError::MalformedDag(format!("{wire:?} breaks at {at:?}")))?;
                steps += 1;
            }
            if self.graph.find_edge(ends.last, ends.output).is_none() {
                return Err(IrError::MalformedDag(format!("{wire:?} has a stale tail")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    fn two_qubit_dag() -> CircuitDag {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));
        dag.add_qubit(QubitId(1));
        dag
    }

    #[test]
    fn test_empty_dag() {
        let dag = CircuitDag::new();
        assert_eq!(dag.num_qubits(), 0);
        assert_eq!(dag.num_ops(), 0);
        assert_eq!(dag.depth(), 0);
    }

    #[test]
    fn test_bell_state_depth() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)))
            .unwrap();

        assert_eq!(dag.num_ops(), 2);
        assert_eq!(dag.depth(), 2);
    }

    #[test]
    fn test_parallel_gates_depth() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();
        assert_eq!(dag.depth(), 1);
    }

    #[test]
    fn test_ops_come_out_in_application_order() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::X, QubitId(1)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::S, QubitId(1)))
            .unwrap();

        let names: Vec<_> = dag.topological_ops().map(|(_, i)| i.name()).collect();
        assert_eq!(names, vec!["x", "h", "s"]);
    }

    #[test]
    fn test_gate_arity_mismatch() {
        let mut dag = two_qubit_dag();
        let result = dag.apply(Instruction::gate(StandardGate::CX, [QubitId(0)]));
        match result {
            Err(IrError::WrongArity { op, expected, got }) => {
                assert_eq!(op, "cx");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("expected WrongArity, got {other:?}"),
        }
    }

    #[test]
    fn test_qubit_not_found_with_context() {
        let mut dag = two_qubit_dag();
        let result = dag.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            QubitId(0),
            QubitId(99),
        ));
        match result {
            Err(IrError::UnknownQubit { qubit, op }) => {
                assert_eq!(qubit, QubitId(99));
                assert_eq!(op, "cx");
            }
            other => panic!("expected UnknownQubit, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut dag = two_qubit_dag();
        let result = dag.apply(Instruction::two_qubit_gate(
            StandardGate::CZ,
            QubitId(1),
            QubitId(1),
        ));
        assert!(matches!(result, Err(IrError::RepeatedQubit { .. })));
    }

    #[test]
    fn test_rebuild_keeps_wires() {
        let mut dag = two_qubit_dag();
        dag.add_clbit(ClbitId(0));
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();

        let rebuilt = dag
            .rebuild([
                Instruction::single_qubit_gate(StandardGate::X, QubitId(1)),
                Instruction::measure(QubitId(1), ClbitId(0)),
            ])
            .unwrap();

        assert_eq!(rebuilt.num_qubits(), 2);
        assert_eq!(rebuilt.num_clbits(), 1);
        assert_eq!(rebuilt.num_ops(), 2);
        rebuilt.verify_integrity().unwrap();
    }

    #[test]
    fn test_count_ops() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)))
            .unwrap();
        dag.apply(Instruction::two_qubit_gate(StandardGate::CX, QubitId(1), QubitId(0)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::T, QubitId(1)))
            .unwrap();

        let counts = dag.count_ops();
        assert_eq!(counts["cx"], 2);
        assert_eq!(counts["t"], 1);
    }

    #[test]
    fn test_verify_integrity_with_measurement() {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));
        dag.add_clbit(ClbitId(0));
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::measure(QubitId(0), ClbitId(0)))
            .unwrap();
        dag.verify_integrity().unwrap();
    }
}

//! Property-based tests for the circuit DAG.

use proptest::prelude::*;
use qsweep_ir::{Circuit, QubitId, StandardGate};

#[derive(Debug, Clone)]
enum GateOp {
    Single(StandardGate, u32),
    CX(u32, u32),
}

impl GateOp {
    fn apply(&self, circuit: &mut Circuit) {
        let result = match *self {
            GateOp::Single(gate, q) => circuit
                .append(qsweep_ir::Instruction::single_qubit_gate(gate, QubitId(q)))
                .map(|_| ()),
            GateOp::CX(c, t) => circuit.cx(QubitId(c), QubitId(t)).map(|_| ()),
        };
        result.expect("generated operands are valid");
    }
}

fn arb_gate_op(num_qubits: u32) -> BoxedStrategy<GateOp> {
    let single = (
        prop_oneof![
            Just(StandardGate::H),
            Just(StandardGate::S),
            Just(StandardGate::T),
            Just(StandardGate::X),
            (-3.0_f64..3.0).prop_map(StandardGate::Rz),
        ],
        0..num_qubits,
    )
        .prop_map(|(g, q)| GateOp::Single(g, q));

    if num_qubits < 2 {
        single.boxed()
    } else {
        prop_oneof![
            single,
            (0..num_qubits, 0..num_qubits)
                .prop_filter("Control and target must differ", |(c, t)| c != t)
                .prop_map(|(c, t)| GateOp::CX(c, t)),
        ]
        .boxed()
    }
}

fn arb_circuit() -> impl Strategy<Value = (Circuit, Vec<GateOp>)> {
    (1_u32..=5).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits), 0..=20).prop_map(move |ops| {
            let mut circuit = Circuit::with_size("prop", num_qubits, 0);
            for op in &ops {
                op.apply(&mut circuit);
            }
            (circuit, ops)
        })
    })
}

proptest! {
    #[test]
    fn test_dag_integrity_and_depth_bound((circuit, ops) in arb_circuit()) {
        circuit.dag().verify_integrity().unwrap();
        prop_assert_eq!(circuit.dag().num_ops(), ops.len());
        prop_assert!(circuit.depth() <= ops.len());
    }

    #[test]
    fn test_rebuild_preserves_instruction_order((circuit, _ops) in arb_circuit()) {
        let original = circuit.instructions();
        let rebuilt = circuit.dag().rebuild(original.clone()).unwrap();
        prop_assert_eq!(rebuilt.instructions(), original);
        prop_assert_eq!(rebuilt.depth(), circuit.depth());
    }

    #[test]
    fn test_construction_is_deterministic((circuit, ops) in arb_circuit()) {
        let mut again = Circuit::with_size("prop", circuit.num_qubits() as u32, 0);
        for op in &ops {
            op.apply(&mut again);
        }
        prop_assert_eq!(again.instructions(), circuit.instructions());
        prop_assert_eq!(again.draw(), circuit.draw());
    }

    #[test]
    fn test_drawing_has_one_row_per_qubit((circuit, _ops) in arb_circuit()) {
        let text = circuit.draw();
        let rows = text.lines().filter(|l| l.trim_start().starts_with("q_")).count();
        prop_assert_eq!(rows, circuit.num_qubits());
    }
}

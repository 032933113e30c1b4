//! The stabilizer / non-stabilizer circuit pair of the timing sweep.
//!
//! Both circuits prepare a GHZ-like chain:
//!
//! ```text
//! q_0: ─H──●──────────────
//!          │
//! q_1: ────X──●──S──(T)───
//!             │
//! q_2: ───────X── ...
//! ```
//!
//! followed by `measure_all`. The non-stabilizer variant adds a single `t`
//! on qubit 1, which is enough to leave the Clifford group.

use qsweep_ir::{Circuit, QubitId};

use crate::error::{DemoError, DemoResult};

/// `h(0)`, a CX chain, `s(1)`, then `measure_all`.
pub fn build_stabilizer_circuit(num_qubits: u32) -> DemoResult<Circuit> {
    build_chain(num_qubits, false)
}

/// [`build_stabilizer_circuit`] with an extra `t(1)` right after `s(1)`.
pub fn build_nonstabilizer_circuit(num_qubits: u32) -> DemoResult<Circuit> {
    build_chain(num_qubits, true)
}

fn build_chain(num_qubits: u32, with_t: bool) -> DemoResult<Circuit> {
    if num_qubits < 2 {
        return Err(DemoError::TooFewQubits(num_qubits));
    }
    let name = if with_t { "non_clifford" } else { "clifford" };
    let mut circuit = Circuit::with_size(name, num_qubits, 0);

    circuit.h(QubitId(0))?;
    for i in 0..num_qubits - 1 {
        circuit.cx(QubitId(i), QubitId(i + 1))?;
    }
    circuit.s(QubitId(1))?;
    if with_t {
        circuit.t(QubitId(1))?;
    }
    circuit.measure_all()?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_too_few_qubits() {
        for n in [0, 1] {
            assert!(matches!(
                build_stabilizer_circuit(n),
                Err(DemoError::TooFewQubits(m)) if m == n
            ));
            assert!(matches!(
                build_nonstabilizer_circuit(n),
                Err(DemoError::TooFewQubits(m)) if m == n
            ));
        }
    }

    #[test]
    fn test_two_qubit_gate_sequence() {
        let c = build_stabilizer_circuit(2).unwrap();
        assert_eq!(c.gate_names(), vec!["h", "cx", "s"]);
        assert_eq!(c.num_clbits(), 2);
        assert!(c.is_clifford());

        let nc = build_nonstabilizer_circuit(2).unwrap();
        assert_eq!(nc.gate_names(), vec!["h", "cx", "s", "t"]);
        assert!(!nc.is_clifford());
    }

    #[test]
    fn test_measure_all_register() {
        let c = build_stabilizer_circuit(4).unwrap();
        assert!(c.clbits().iter().all(|b| b.register.as_deref() == Some("meas")));
        assert!(c.has_terminal_measurements_only());
    }

    proptest! {
        #[test]
        fn prop_variants_differ_by_one_t(n in 2u32..40) {
            let stab = build_stabilizer_circuit(n).unwrap();
            let non = build_nonstabilizer_circuit(n).unwrap();

            let mut with_t = stab.instructions();
            let s_pos = with_t
                .iter()
                .position(|inst| inst.name() == "s")
                .unwrap();
            with_t.insert(
                s_pos + 1,
                qsweep_ir::Instruction::single_qubit_gate(qsweep_ir::StandardGate::T, QubitId(1)),
            );
            prop_assert_eq!(with_t, non.instructions());
            prop_assert_eq!(stab.num_qubits(), n as usize);
            prop_assert_eq!(stab.num_clbits(), n as usize);
        }

        #[test]
        fn prop_construction_is_deterministic(n in 2u32..40) {
            prop_assert_eq!(
                build_nonstabilizer_circuit(n).unwrap().instructions(),
                build_nonstabilizer_circuit(n).unwrap().instructions()
            );
        }
    }
}

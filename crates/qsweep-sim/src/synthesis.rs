//! Pauli-string exponentiation.
//!
//! Synthesises `exp(-i · coeff · t · P)` for a Pauli string P from
//!
//!   exp(-i θ/2 · Z⊗Z⊗...⊗Z) = CX_ladder† · Rz(θ) on last · CX_ladder
//!
//! with each X factor rotated into Z by H and each Y factor by Sdg·H.
//! A string with k non-identity factors costs 2(k-1) CX, at most 4k basis
//! gates and one Rz.

use qsweep_ir::{Circuit, QubitId};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{HamiltonianTerm, PauliOp};

/// Append the circuit for `exp(-i · coeff · t · P)` to `circuit`.
///
/// Every qubit the term touches must be below `n_qubits`. The identity string
/// is a global phase and appends nothing.
pub fn append_exp_pauli(
    circuit: &mut Circuit,
    term: &HamiltonianTerm,
    t: f64,
    n_qubits: u32,
) -> SimResult<()> {
    let ops = term.pauli.ops();
    let Some(&(last, _)) = ops.last() else {
        return Ok(());
    };
    if last >= n_qubits {
        return Err(SimError::QubitOutOfRange {
            qubit: last,
            n_qubits,
        });
    }

    // Rz(θ) = exp(-i θ/2 Z)
    let theta = 2.0 * term.coeff * t;
    let qubits: Vec<QubitId> = ops.iter().map(|&(q, _)| QubitId(q)).collect();

    rotate_into_z(circuit, ops)?;
    for pair in qubits.windows(2) {
        circuit.cx(pair[0], pair[1])?;
    }
    circuit.rz(theta, QubitId(last))?;
    for pair in qubits.windows(2).rev() {
        circuit.cx(pair[0], pair[1])?;
    }
    rotate_out_of_z(circuit, ops)?;

    Ok(())
}

fn rotate_into_z(circuit: &mut Circuit, ops: &[(u32, PauliOp)]) -> SimResult<()> {
    for &(q, op) in ops {
        match op {
            PauliOp::X => {
                circuit.h(QubitId(q))?;
            }
            PauliOp::Y => {
                circuit.sdg(QubitId(q))?.h(QubitId(q))?;
            }
            PauliOp::Z | PauliOp::I => {}
        }
    }
    Ok(())
}

fn rotate_out_of_z(circuit: &mut Circuit, ops: &[(u32, PauliOp)]) -> SimResult<()> {
    for &(q, op) in ops {
        match op {
            PauliOp::X => {
                circuit.h(QubitId(q))?;
            }
            PauliOp::Y => {
                circuit.h(QubitId(q))?.s(QubitId(q))?;
            }
            PauliOp::Z | PauliOp::I => {}
        }
    }
    Ok(())
}

//! Ansatz circuits for the variational demos.

use qsweep_ir::{Circuit, IrResult, QubitId};
use qsweep_sim::synthesis::append_exp_pauli;
use qsweep_sim::{HamiltonianTerm, PauliString};

use crate::error::{DemoError, DemoResult};

/// Number of parameters of [`uccsd_ansatz`].
pub const NUM_UCCSD_PARAMS: usize = 3;

/// Excitation generators of the reduced two-qubit H₂ problem, as Pauli labels
/// (qubit 0 rightmost): two singles and one double.
const UCCSD_GENERATORS: [&str; NUM_UCCSD_PARAMS] = ["IY", "YI", "XY"];

/// `ry(θ₀)` on qubit 0, `ry(θ₁)` on qubit 1, then `cx(0, 1)`.
pub fn toy_ansatz(params: &[f64]) -> DemoResult<Circuit> {
    let &[theta0, theta1] = params else {
        return Err(DemoError::Config(format!(
            "toy ansatz takes 2 parameters, got {}",
            params.len()
        )));
    };
    let mut circuit = Circuit::with_size("ry_cx", 2, 0);
    circuit
        .ry(theta0, QubitId(0))?
        .ry(theta1, QubitId(1))?
        .cx(QubitId(0), QubitId(1))?;
    Ok(circuit)
}

/// Hartree-Fock reference of parity-mapped, two-qubit-reduced H₂: |01⟩.
pub fn hartree_fock_state() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("hartree_fock", 2, 0);
    circuit.x(QubitId(0))?;
    Ok(circuit)
}

/// Hartree-Fock state followed by `exp(-i θₖ/2 · Gₖ)` for each generator.
///
/// The double excitation maps |01⟩ to `cos(θ/2)|01⟩ - sin(θ/2)|10⟩`, which
/// spans the ground state of the reduced H₂ Hamiltonian.
pub fn uccsd_ansatz(params: &[f64]) -> DemoResult<Circuit> {
    if params.len() != NUM_UCCSD_PARAMS {
        return Err(DemoError::Config(format!(
            "UCCSD ansatz takes {NUM_UCCSD_PARAMS} parameters, got {}",
            params.len()
        )));
    }
    let mut circuit = hartree_fock_state()?;
    circuit.set_name("uccsd");
    for (&theta, label) in params.iter().zip(UCCSD_GENERATORS) {
        let term = HamiltonianTerm::new(theta / 2.0, PauliString::from_label(label)?);
        append_exp_pauli(&mut circuit, &term, 1.0, 2)?;
    }
    Ok(circuit)
}

//! Hand-built Trotter circuits.

use qsweep_ir::{Circuit, IrResult, QubitId};

/// `n_steps` slices of `rz(-2dt)` on qubit 0 and `rx(-2dt)` on qubit 1.
///
/// Each slice is `exp(i dt Z₀) · exp(i dt X₁)`. The two terms act on
/// different qubits and commute, so the product is exact for any step count.
pub fn field_rotation_steps(t: f64, n_steps: usize) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("trotter_fields", 2, 0);
    if n_steps == 0 {
        return Ok(circuit);
    }
    let dt = t / n_steps as f64;
    for _ in 0..n_steps {
        circuit.rz(-2.0 * dt, QubitId(0))?;
        circuit.rx(-2.0 * dt, QubitId(1))?;
    }
    Ok(circuit)
}

/// One first-order step of `H = Z₀Z₁ + X₀` over time `t`.
///
/// `exp(-i t Z₀Z₁)` as `cx · rz(2t) · cx`, then `exp(-i t X₀)` as `rx(2t)`.
pub fn zz_plus_x_step(t: f64) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("trotter_zz_x", 2, 0);
    circuit
        .cx(QubitId(0), QubitId(1))?
        .rz(2.0 * t, QubitId(1))?
        .cx(QubitId(0), QubitId(1))?
        .rx(2.0 * t, QubitId(0))?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsweep_sim::{Hamiltonian, Statevector};

    #[test]
    fn test_field_rotation_step_count_is_irrelevant() {
        let coarse = Statevector::from_circuit(&field_rotation_steps(1.0, 1).unwrap()).unwrap();
        let fine = Statevector::from_circuit(&field_rotation_steps(1.0, 10).unwrap()).unwrap();
        for (a, b) in coarse.amplitudes().iter().zip(fine.amplitudes()) {
            assert!((a - b).norm() < 1e-10);
        }
    }

    #[test]
    fn test_field_rotation_populations() {
        // Qubit 1 sees Rx(-2t): P(1) = sin²t. Qubit 0 only picks up a phase.
        let state = Statevector::from_circuit(&field_rotation_steps(1.0, 10).unwrap()).unwrap();
        let p = state.probabilities();
        assert!((p[0b10] - 1.0_f64.sin().powi(2)).abs() < 1e-10);
        assert!(p[0b01].abs() < 1e-12 && p[0b11].abs() < 1e-12);
    }

    #[test]
    fn test_zz_plus_x_expectation() {
        // From |00⟩: ZZ phase is global, Rx(2t) on q0 gives ⟨Z₀Z₁⟩ = cos 2t.
        let t = 1.0;
        let state = Statevector::from_circuit(&zz_plus_x_step(t).unwrap()).unwrap();
        let zz = Hamiltonian::from_labels([("ZZ", 1.0)]).unwrap();
        assert!((zz.expectation(&state).unwrap() - (2.0 * t).cos()).abs() < 1e-10);
    }
}

//! Tests for Hamiltonians, expectation values and exact spectra.

use proptest::prelude::*;
use qsweep_ir::{Circuit, QubitId};
use qsweep_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
use qsweep_sim::{SimError, Statevector};

/// Parity-mapped, two-qubit-reduced H₂ at 0.735 Å in STO-3G.
fn h2() -> Hamiltonian {
    Hamiltonian::from_labels([
        ("II", -1.052373245772859),
        ("IZ", 0.39793742484318045),
        ("ZI", -0.39793742484318045),
        ("ZZ", -0.01128010425623538),
        ("XX", 0.18093119978423156),
    ])
    .unwrap()
}

fn toy_ansatz(theta0: f64, theta1: f64) -> Circuit {
    let mut circuit = Circuit::with_size("ansatz", 2, 0);
    circuit
        .ry(theta0, QubitId(0))
        .unwrap()
        .ry(theta1, QubitId(1))
        .unwrap()
        .cx(QubitId(0), QubitId(1))
        .unwrap();
    circuit
}

// ---------------------------------------------------------------------------
// PauliString
// ---------------------------------------------------------------------------

#[test]
fn pauli_string_drops_identity() {
    let ps = PauliString::from_ops([(0, PauliOp::I), (1, PauliOp::Z)]);
    assert_eq!(ps.ops(), &[(1, PauliOp::Z)]);
}

#[test]
fn pauli_string_sorted_by_qubit() {
    let ps = PauliString::from_ops([(3, PauliOp::X), (1, PauliOp::Z), (0, PauliOp::Y)]);
    let qubits: Vec<u32> = ps.ops().iter().map(|(q, _)| *q).collect();
    assert_eq!(qubits, vec![0, 1, 3]);
}

#[test]
fn label_rightmost_is_qubit_zero() {
    assert_eq!(
        PauliString::from_label("XI").unwrap(),
        PauliString::from_ops([(1, PauliOp::X)])
    );
}

// ---------------------------------------------------------------------------
// Hamiltonian
// ---------------------------------------------------------------------------

#[test]
fn lambda_and_min_qubits() {
    let h = Hamiltonian::from_terms(vec![
        HamiltonianTerm::zz(0, 3, -2.0),
        HamiltonianTerm::x(1, 0.5),
    ]);
    assert!((h.lambda() - 2.5).abs() < 1e-12);
    assert_eq!(h.min_qubits(), 4);
    assert_eq!(h.num_qubits(), 4);
}

#[test]
fn empty_hamiltonian_has_no_matrix() {
    let h = Hamiltonian::from_terms(vec![]);
    assert!(matches!(h.to_matrix(), Err(SimError::EmptyHamiltonian)));
}

#[test]
fn h2_spectrum() {
    let values = h2().eigenvalues().unwrap();
    let expected = [
        -1.857_275_030_202_380,
        -1.244_584_549_813_326,
        -0.882_722_150_244_863,
        -0.224_911_252_830_867,
    ];
    assert_eq!(values.len(), 4);
    for (got, want) in values.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} vs {want}");
    }
}

#[test]
fn h2_hartree_fock_energy() {
    // |01⟩: X on qubit 0
    let mut circuit = Circuit::with_size("hf", 2, 0);
    circuit.x(QubitId(0)).unwrap();
    let state = Statevector::from_circuit(&circuit).unwrap();
    let energy = h2().expectation(&state).unwrap();
    assert!((energy + 1.836_967_991_202_984).abs() < 1e-9);
}

#[test]
fn expectation_rejects_narrow_state() {
    let h = Hamiltonian::from_labels([("ZII", 1.0)]).unwrap();
    assert!(matches!(
        h.expectation(&Statevector::new(2)),
        Err(SimError::QubitOutOfRange { qubit: 2, n_qubits: 2 })
    ));
}

#[test]
fn toy_ground_energy_is_minus_sqrt_two() {
    let h = Hamiltonian::from_labels([("ZZ", 1.0), ("XI", 1.0)]).unwrap();
    assert!((h.ground_energy().unwrap() + 2f64.sqrt()).abs() < 1e-10);
}

proptest! {
    /// After CX(0, 1), ZZ measures qubit 1's pre-CX Z and XI its X, so
    /// the energy is cos θ₁ + sin θ₁ whatever θ₀ is.
    #[test]
    fn toy_energy_closed_form(theta0 in -3.2..3.2f64, theta1 in -3.2..3.2f64) {
        let h = Hamiltonian::from_labels([("ZZ", 1.0), ("XI", 1.0)]).unwrap();
        let state = Statevector::from_circuit(&toy_ansatz(theta0, theta1)).unwrap();
        let energy = h.expectation(&state).unwrap();
        prop_assert!((energy - (theta1.cos() + theta1.sin())).abs() < 1e-10);
    }

    #[test]
    fn expectation_within_spectrum(theta0 in -3.2..3.2f64, theta1 in -3.2..3.2f64) {
        let h = h2();
        let values = h.eigenvalues().unwrap();
        let state = Statevector::from_circuit(&toy_ansatz(theta0, theta1)).unwrap();
        let energy = h.expectation(&state).unwrap();
        prop_assert!(energy >= values[0] - 1e-9);
        prop_assert!(energy <= values[3] + 1e-9);
    }
}

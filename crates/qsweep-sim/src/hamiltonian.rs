//! Real-weighted sums of Pauli strings.
//!
//! Labels are little-endian: the last character acts on qubit 0, so `"XI"`
//! is X on qubit 1. This matches how measured bitstrings are printed.
//!
//! ```rust
//! use qsweep_sim::hamiltonian::{Hamiltonian, PauliOp, PauliString};
//!
//! // Z₀Z₁ + X₁
//! let h = Hamiltonian::from_labels([("ZZ", 1.0), ("XI", 1.0)])?;
//! assert_eq!(h.terms()[1].pauli, PauliString::from_ops([(1, PauliOp::X)]));
//! assert!((h.eigenvalues()?[0] + 2f64.sqrt()).abs() < 1e-9);
//! # Ok::<(), qsweep_sim::SimError>(())
//! ```

use std::fmt;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::linalg::hermitian_eigenvalues;
use crate::statevector::Statevector;

/// Widest register [`Hamiltonian::to_matrix`] will densify.
pub const MAX_DENSE_QUBITS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    I,
    X,
    Y,
    Z,
}

impl TryFrom<char> for PauliOp {
    type Error = char;

    fn try_from(c: char) -> Result<Self, char> {
        match c {
            'I' => Ok(Self::I),
            'X' => Ok(Self::X),
            'Y' => Ok(Self::Y),
            'Z' => Ok(Self::Z),
            other => Err(other),
        }
    }
}

impl From<PauliOp> for char {
    fn from(op: PauliOp) -> char {
        match op {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }
}

/// Tensor product of Paulis. Only non-identity factors are stored, ordered by
/// qubit; any qubit not listed carries I.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut ops: Vec<_> = ops.into_iter().filter(|&(_, op)| op != PauliOp::I).collect();
        ops.sort_unstable_by_key(|&(q, _)| q);
        Self { ops }
    }

    /// `"XIZ"` is Z on qubit 0 and X on qubit 2.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_label(label: &str) -> SimResult<Self> {
        let mut ops = Vec::with_capacity(label.len());
        for (q, c) in label.chars().rev().enumerate() {
            let op = PauliOp::try_from(c)
                .map_err(|_| SimError::InvalidPauliLabel(label.to_string()))?;
            ops.push((q as u32, op));
        }
        Ok(Self::from_ops(ops))
    }

    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|&(q, _)| q)
    }

    /// Little-endian label padded with I to `n_qubits` characters.
    pub fn to_label(&self, n_qubits: u32) -> String {
        let mut label = vec!['I'; n_qubits as usize];
        for &(q, op) in &self.ops {
            if let Some(slot) = label.get_mut(q as usize) {
                *slot = op.into();
            }
        }
        label.iter().rev().collect()
    }

    /// `P|b⟩ = phase·|b'⟩`; returns `(b', phase)`.
    pub fn map_basis(&self, basis: usize) -> (usize, Complex64) {
        const I: Complex64 = Complex64::new(0.0, 1.0);
        self.ops
            .iter()
            .fold((basis, Complex64::new(1.0, 0.0)), |(image, phase), &(q, op)| {
                let mask = 1usize << q;
                let one = basis & mask != 0;
                match op {
                    PauliOp::I => (image, phase),
                    PauliOp::X => (image ^ mask, phase),
                    // Y|0⟩ = i|1⟩ and Y|1⟩ = -i|0⟩
                    PauliOp::Y => (image ^ mask, if one { -phase * I } else { phase * I }),
                    PauliOp::Z => (image, if one { -phase } else { phase }),
                }
            })
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_label(self.max_qubit().map_or(1, |q| q + 1)))
    }
}

/// `coeff · pauli`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    pub coeff: f64,
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    fn single(qubit: u32, op: PauliOp, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, op)]))
    }

    pub fn x(qubit: u32, coeff: f64) -> Self {
        Self::single(qubit, PauliOp::X, coeff)
    }

    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::single(qubit, PauliOp::Z, coeff)
    }

    /// `coeff · Z_a Z_b`.
    pub fn zz(a: u32, b: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(a, PauliOp::Z), (b, PauliOp::Z)]))
    }
}

/// `H = Σ_k c_k P_k`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
    /// Set by [`from_labels`](Self::from_labels), which fixes the width even
    /// for identity-only labels.
    label_width: Option<u32>,
}

impl Hamiltonian {
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        Self {
            terms,
            label_width: None,
        }
    }

    /// `(label, coeff)` pairs. Every label must be as wide as the first.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = (&'a str, f64)>) -> SimResult<Self> {
        let mut terms = Vec::new();
        let mut width = None;
        for (label, coeff) in labels {
            let got = label.chars().count();
            let expected = *width.get_or_insert(got);
            if got != expected {
                return Err(SimError::LabelWidthMismatch {
                    label: label.to_string(),
                    expected,
                    got,
                });
            }
            terms.push(HamiltonianTerm::new(coeff, PauliString::from_label(label)?));
        }
        Ok(Self {
            terms,
            label_width: width.map(|w| w as u32),
        })
    }

    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// `Σ |c_k|`, which bounds the spectral norm.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// One past the highest qubit any term touches; 0 when none does.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// The label width when there is one, never less than [`min_qubits`](Self::min_qubits).
    pub fn num_qubits(&self) -> u32 {
        self.label_width.unwrap_or(0).max(self.min_qubits())
    }

    /// Dense `2ⁿ × 2ⁿ` matrix, little-endian basis order.
    pub fn to_matrix(&self) -> SimResult<Array2<Complex64>> {
        if self.terms.is_empty() {
            return Err(SimError::EmptyHamiltonian);
        }
        let n = self.num_qubits();
        if n > MAX_DENSE_QUBITS {
            return Err(SimError::TooManyQubits {
                n_qubits: n,
                max: MAX_DENSE_QUBITS,
            });
        }
        let dim = 1usize << n;
        let mut matrix = Array2::<Complex64>::zeros((dim, dim));
        for term in &self.terms {
            for col in 0..dim {
                let (row, phase) = term.pauli.map_basis(col);
                matrix[[row, col]] += phase * term.coeff;
            }
        }
        Ok(matrix)
    }

    /// Exact spectrum, ascending.
    pub fn eigenvalues(&self) -> SimResult<Vec<f64>> {
        hermitian_eigenvalues(&self.to_matrix()?)
    }

    pub fn ground_energy(&self) -> SimResult<f64> {
        self.eigenvalues()?
            .first()
            .copied()
            .ok_or(SimError::EmptyHamiltonian)
    }

    /// `⟨ψ|H|ψ⟩`. The state must cover every qubit a term touches.
    #[allow(clippy::cast_possible_truncation)]
    pub fn expectation(&self, state: &Statevector) -> SimResult<f64> {
        let width = state.num_qubits() as u32;
        let needed = self.min_qubits();
        if needed > width {
            return Err(SimError::QubitOutOfRange {
                qubit: needed - 1,
                n_qubits: width,
            });
        }

        let amps = state.amplitudes();
        let energy = self
            .terms
            .iter()
            .map(|term| {
                let overlap: Complex64 = amps
                    .iter()
                    .enumerate()
                    .map(|(basis, amp)| {
                        let (image, phase) = term.pauli.map_basis(basis);
                        amps[image].conj() * phase * amp
                    })
                    .sum();
                term.coeff * overlap.re
            })
            .sum();
        Ok(energy)
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        Self::from_terms(iter.into_iter().collect())
    }
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.num_qubits().max(1);
        let lines: Vec<String> = self
            .terms
            .iter()
            .map(|t| format!("{:+.8} * {}", t.coeff, t.pauli.to_label(width)))
            .collect();
        f.write_str(&lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_little_endian() {
        let ps = PauliString::from_label("XIZ").unwrap();
        assert_eq!(ps.ops(), &[(0, PauliOp::Z), (2, PauliOp::X)]);
        assert_eq!(ps.to_label(3), "XIZ");
        assert_eq!(ps.to_string(), "XIZ");
    }

    #[test]
    fn test_invalid_label() {
        assert!(matches!(
            PauliString::from_label("XQ"),
            Err(SimError::InvalidPauliLabel(_))
        ));
    }

    #[test]
    fn test_label_width_mismatch() {
        let err = Hamiltonian::from_labels([("ZZ", 1.0), ("X", 1.0)]).unwrap_err();
        assert!(matches!(err, SimError::LabelWidthMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_identity_labels_keep_width() {
        let h = Hamiltonian::from_labels([("II", 0.5)]).unwrap();
        assert_eq!(h.min_qubits(), 0);
        assert_eq!(h.num_qubits(), 2);
        assert_eq!(h.eigenvalues().unwrap(), vec![0.5; 4]);
    }

    #[test]
    fn test_y_phases() {
        let y = PauliString::from_ops([(0, PauliOp::Y)]);
        assert_eq!(y.map_basis(0), (1, Complex64::new(0.0, 1.0)));
        assert_eq!(y.map_basis(1), (0, Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_matrix_is_hermitian() {
        let h = Hamiltonian::from_labels([("XY", 0.3), ("ZI", -1.0), ("YY", 0.7)]).unwrap();
        let m = h.to_matrix().unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert!((m[[i, j]] - m[[j, i]].conj()).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_display() {
        let h = Hamiltonian::from_labels([("ZZ", 1.0), ("XI", -0.5)]).unwrap();
        assert_eq!(h.to_string(), "+1.00000000 * ZZ\n-0.50000000 * XI");
    }
}

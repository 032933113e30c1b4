//! `qsweep-sim`: Pauli Hamiltonians and exact statevector evolution.
//!
//! - [`Hamiltonian`]: sums of Pauli strings, parsed from little-endian labels,
//!   with dense matrices and exact eigenvalues for small registers
//! - [`Statevector`]: dense state evolution, measurement and sampling
//! - [`TrotterEvolution`]: product-formula circuits approximating `exp(-i H t)`
//!
//! # Quick start
//!
//! ```rust
//! use qsweep_sim::{Hamiltonian, Statevector};
//! use qsweep_ir::{Circuit, QubitId};
//!
//! // H = Z₀Z₁ + X₁ on the state Ry(θ₀) ⊗ Ry(θ₁) followed by CX(0, 1)
//! let h = Hamiltonian::from_labels([("ZZ", 1.0), ("XI", 1.0)])?;
//!
//! let mut ansatz = Circuit::with_size("ansatz", 2, 0);
//! ansatz.ry(0.1, QubitId(0))?.ry(0.1, QubitId(1))?.cx(QubitId(0), QubitId(1))?;
//!
//! let state = Statevector::from_circuit(&ansatz)?;
//! let energy = h.expectation(&state)?;
//! assert!(energy > h.ground_energy()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod hamiltonian;
pub mod linalg;
pub mod statevector;
pub mod synthesis;
pub mod trotter;

pub use error::{SimError, SimResult};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
pub use statevector::Statevector;
pub use trotter::{TrotterEvolution, TrotterOrder};

//! Circuit builders for the demos.

pub mod basics;
pub mod clifford;
pub mod trotter;
pub mod vqe;

pub use basics::{bell_measured, ghz_unmeasured, hadamard_sample, long_range_cx};
pub use clifford::{build_nonstabilizer_circuit, build_stabilizer_circuit};
pub use trotter::{field_rotation_steps, zz_plus_x_step};
pub use vqe::{NUM_UCCSD_PARAMS, hartree_fock_state, toy_ansatz, uccsd_ansatz};

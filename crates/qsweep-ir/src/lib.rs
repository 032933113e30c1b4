//! Circuit IR shared by every qsweep crate.
//!
//! [`Circuit`] is the builder users touch. Underneath it sits a
//! [`CircuitDag`] that compilation passes rewrite; iterating it yields
//! operations in the order they were applied, so equal build calls give equal
//! instruction lists.
//!
//! ```rust
//! use qsweep_ir::{Circuit, QubitId};
//!
//! let mut ghz = Circuit::ghz(3)?;
//! ghz.measure_all()?;
//! assert_eq!(ghz.gate_names(), ["h", "cx", "cx"]);
//! assert!(ghz.is_clifford());
//! assert!(ghz.has_terminal_measurements_only());
//! # Ok::<(), qsweep_ir::IrError>(())
//! ```
//!
//! Gates, by Clifford membership:
//!
//! - Clifford: `id x y z h s sdg sx sxdg cx cy cz swap`
//! - non-Clifford: `t tdg rx ry rz p u rzz ccx`

pub mod circuit;
pub mod dag;
pub mod draw;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagNode, NodeIndex, WireId};
pub use draw::draw;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId, Wire};

//! Circuit compilation for qsweep targets.
//!
//! [`transpile`] rewrites a circuit so every two-qubit gate lands on a
//! coupled pair and every gate is in the target basis. Internally it builds a
//! [`PassManager`] whose passes share a [`PropertySet`]:
//!
//! ```text
//! Unroll3q ─► TrivialLayout ─► BasicRouting ─► BasisTranslation ─► CancelInverses
//! └────────── coupling map set ───────────┘    basis gates set     level >= 1
//! ```
//!
//! ```
//! use qsweep_compile::{transpile, BasisGates, TranspileOptions};
//! use qsweep_ir::Circuit;
//!
//! let options = TranspileOptions::new().with_basis_gates(BasisGates::rz_sx_cx());
//! let compiled = transpile(&Circuit::bell()?, &options)?;
//! assert!(compiled.gate_names().iter().all(|g| ["rz", "sx", "cx"].contains(g)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Passes outside this list implement [`Pass`] and can be chained with
//! [`PassManager::then`].

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;
pub mod target;
pub mod transpile;

pub use error::{CompileError, CompileResult};
pub use manager::PassManager;
pub use pass::Pass;
pub use property::{Layout, PropertySet};
pub use target::{BasisGates, CouplingMap};
pub use transpile::{TranspileOptions, transpile};

//! Local Quantum Simulator
//!
//! This crate provides a local simulator backend for sampling measurement
//! outcomes. Two state representations are available:
//!
//! - **Statevector**: dense 2ⁿ amplitudes, any gate from `qsweep-ir`.
//!   Memory doubles with every qubit.
//! - **Stabilizer**: Aaronson-Gottesman tableau for Clifford-only circuits
//!   (`h`, `s`, `cx`, Paulis, ...). Polynomial in the qubit count.
//!
//! [`SimulationMethod::Automatic`] picks the stabilizer method whenever the
//! circuit is Clifford-only. A single `t` gate forces the statevector path,
//! which is what makes the stabilizer/non-stabilizer timing gap visible.
//!
//! # Performance
//!
//! | Qubits | Statevector memory | Stabilizer memory |
//! |--------|--------------------|-------------------|
//! | 10 | ~16 KB | < 1 KB |
//! | 15 | ~512 KB | ~1 KB |
//! | 20 | ~16 MB | ~2 KB |
//! | 25 | ~512 MB | ~3 KB |
//!
//! Circuits whose measurements are all terminal are evolved once and then
//! sampled. Mid-circuit measurements and resets fall back to one trajectory
//! per shot.
//!
//! # Example
//!
//! ```ignore
//! use qsweep_adapter_sim::SimulatorBackend;
//! use qsweep_hal::Backend;
//! use qsweep_ir::Circuit;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new().with_seed(7);
//!
//!     let circuit = Circuit::bell()?;
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     // ~50% |00⟩ and ~50% |11⟩
//!     println!("Results: {}", result.counts);
//!     Ok(())
//! }
//! ```

mod simulator;
mod stabilizer;

pub use simulator::{SimulationMethod, SimulatorBackend};

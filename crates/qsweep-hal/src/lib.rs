//! Backend abstraction for qsweep.
//!
//! Drivers talk to [`Backend`] and never to a concrete simulator. A backend
//! advertises [`Capabilities`], accepts circuits as jobs and hands back
//! [`Counts`] keyed by bitstrings whose rightmost character is clbit 0.
//!
//! # Example
//!
//! ```ignore
//! use qsweep_hal::Backend;
//! use qsweep_adapter_sim::SimulatorBackend;
//! use qsweep_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let circuit = Circuit::bell()?;
//!     let backend = SimulatorBackend::new();
//!
//!     let result = backend.run(&circuit, 1000).await?;
//!     println!("{}", result.counts);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory, ValidationResult, WAIT_TIMEOUT};
pub use capability::{Capabilities, GateSet, Topology};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};

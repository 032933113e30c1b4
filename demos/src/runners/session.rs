//! Blocking handle around the async simulator backend.

use std::fmt;

use qsweep_adapter_sim::{SimulationMethod, SimulatorBackend};
use qsweep_hal::{Backend, BackendConfig, BackendFactory, ExecutionResult};
use qsweep_ir::Circuit;
use serde::{Deserialize, Serialize};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::error::DemoResult;

/// Simulator settings shared by the demo binaries and YAML sweep configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorOptions {
    pub method: SimulationMethod,
    pub seed: Option<u64>,
    /// Qubit limit; the backend default applies when unset.
    pub max_qubits: Option<u32>,
}

impl SimulatorOptions {
    fn to_backend_config(&self) -> BackendConfig {
        let mut config =
            BackendConfig::new("simulator").with_option("method", self.method.as_str());
        if let Some(seed) = self.seed {
            config = config.with_option("seed", seed);
        }
        if let Some(max_qubits) = self.max_qubits {
            config = config.with_option("max_qubits", max_qubits);
        }
        config
    }
}

/// A simulator backend plus the single-threaded runtime that drives it.
///
/// Acquire one before a sweep and drop it afterwards. Every call blocks
/// until the job has finished.
pub struct SimulatorSession {
    runtime: Runtime,
    backend: SimulatorBackend,
}

impl SimulatorSession {
    /// Session over a default simulator (automatic method, unseeded).
    pub fn new() -> DemoResult<Self> {
        Self::with_backend(SimulatorBackend::new())
    }

    pub fn with_options(options: &SimulatorOptions) -> DemoResult<Self> {
        Self::with_backend(SimulatorBackend::from_config(options.to_backend_config())?)
    }

    pub fn with_backend(backend: SimulatorBackend) -> DemoResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        debug!(
            method = %backend.method(),
            max_qubits = backend.max_qubits(),
            "simulator session started"
        );
        Ok(Self { runtime, backend })
    }

    pub fn backend(&self) -> &SimulatorBackend {
        &self.backend
    }

    /// Submit `circuit` and block until its result is available.
    pub fn execute(&self, circuit: &Circuit, shots: u32) -> DemoResult<ExecutionResult> {
        let backend = &self.backend;
        let result = self.runtime.block_on(async {
            let job_id = backend.submit(circuit, shots).await?;
            backend.wait(&job_id).await
        })?;
        Ok(result)
    }
}

impl fmt::Debug for SimulatorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatorSession")
            .field("backend", &self.backend.name())
            .field("method", &self.backend.method())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_reach_backend() {
        let options = SimulatorOptions {
            method: SimulationMethod::Statevector,
            seed: Some(9),
            max_qubits: Some(6),
        };
        let session = SimulatorSession::with_options(&options).unwrap();
        assert_eq!(session.backend().method(), SimulationMethod::Statevector);
        assert_eq!(session.backend().max_qubits(), 6);
    }

    #[test]
    fn test_execute_blocks_for_result() {
        let session = SimulatorSession::new().unwrap();
        let result = session.execute(&Circuit::bell().unwrap(), 128).unwrap();
        assert_eq!(result.counts.total_shots(), 128);
    }
}

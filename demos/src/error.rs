//! Error type for the demo library.

use thiserror::Error;

/// Errors raised while building, simulating or solving demo problems.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DemoError {
    /// A sweep circuit needs at least two qubits (`s` and `t` act on qubit 1).
    #[error("circuit needs at least 2 qubits, got {0}")]
    TooFewQubits(u32),

    /// A molecule outside the tabulated set was requested.
    #[error("unsupported molecule: {0}")]
    UnsupportedMolecule(String),

    /// Invalid demo configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("circuit error: {0}")]
    Ir(#[from] qsweep_ir::IrError),

    #[error("backend error: {0}")]
    Hal(#[from] qsweep_hal::HalError),

    #[error("compilation error: {0}")]
    Compile(#[from] qsweep_compile::CompileError),

    #[error("simulation error: {0}")]
    Sim(#[from] qsweep_sim::SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

pub type DemoResult<T> = Result<T, DemoError>;

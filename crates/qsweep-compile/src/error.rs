use qsweep_ir::IrError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    #[error("no coupling map configured")]
    MissingCouplingMap,

    #[error("routing needs a layout, run a layout pass first")]
    MissingLayout,

    #[error("no basis gates configured")]
    MissingBasisGates,

    #[error("circuit uses {circuit} qubits, the device has {device}")]
    TooManyQubits { circuit: usize, device: u32 },

    /// The two physical qubits sit on disconnected parts of the coupling map.
    #[error("no path between physical qubits {from} and {to}")]
    Unroutable { from: u32, to: u32 },

    #[error("'{0}' has no decomposition into the basis")]
    Untranslatable(String),

    #[error(transparent)]
    Ir(#[from] IrError),
}

pub type CompileResult<T> = Result<T, CompileError>;

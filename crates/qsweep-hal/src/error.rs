//! Backend errors.

use thiserror::Error;

use crate::job::JobId;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    #[error("unknown job {0}")]
    UnknownJob(JobId),

    #[error("job failed: {0}")]
    JobFailed(String),

    #[error("job was cancelled")]
    JobCancelled,

    /// The job exists but is not in a state that has a result.
    #[error("job {job} has no result while {status}")]
    ResultUnavailable { job: JobId, status: String },

    #[error("gave up waiting for job {0}")]
    Timeout(JobId),

    /// The backend cannot run this circuit, for the listed reasons.
    #[error("circuit rejected: {0}")]
    InvalidCircuit(String),

    #[error("circuit needs {qubits} qubits, backend has {max}")]
    CircuitTooLarge { qubits: usize, max: u32 },

    #[error("shot count {shots} outside 1..={max}")]
    InvalidShots { shots: u32, max: u32 },

    #[error("invalid backend configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Ir(#[from] qsweep_ir::IrError),
}

pub type HalResult<T> = Result<T, HalError>;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    #[error("Hamiltonian has no terms")]
    EmptyHamiltonian,

    #[error("qubit {qubit} is outside a {n_qubits}-qubit register")]
    QubitOutOfRange { qubit: u32, n_qubits: u32 },

    /// Labels may only contain `I`, `X`, `Y` and `Z`.
    #[error("'{0}' is not a Pauli label")]
    InvalidPauliLabel(String),

    /// Every label of one Hamiltonian must have the width of the first.
    #[error("label '{label}' spans {got} qubits, the Hamiltonian spans {expected}")]
    LabelWidthMismatch {
        label: String,
        expected: usize,
        got: usize,
    },

    /// Measurements and resets have no statevector action.
    #[error("'{0}' is not unitary")]
    NonUnitary(&'static str),

    #[error("{n_qubits} qubits is too wide for a dense matrix, the limit is {max}")]
    TooManyQubits { n_qubits: u32, max: u32 },

    #[error("Jacobi sweeps did not converge after {0} rounds")]
    NoConvergence(usize),

    #[error("a Trotter evolution needs at least one step")]
    ZeroSteps,

    #[error(transparent)]
    Ir(#[from] qsweep_ir::IrError),
}

pub type SimResult<T> = Result<T, SimError>;

//! Circuit construction errors.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Raised when an instruction does not fit the circuit it is added to.
///
/// `op` is the OpenQASM name of the offending instruction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    #[error("{op} references {qubit}, which is not in the circuit")]
    UnknownQubit { qubit: QubitId, op: &'static str },

    #[error("{op} references {clbit}, which is not in the circuit")]
    UnknownClbit { clbit: ClbitId, op: &'static str },

    #[error("{op} acts on {expected} qubits, got {got}")]
    WrongArity {
        op: &'static str,
        expected: u32,
        got: u32,
    },

    #[error("{op} uses {qubit} more than once")]
    RepeatedQubit { qubit: QubitId, op: &'static str },

    #[error("measurement pairs {qubits} qubits with {clbits} clbits")]
    MeasureArity { qubits: usize, clbits: usize },

    /// Broken wiring in a hand-edited DAG.
    #[error("malformed circuit graph: {0}")]
    MalformedDag(String),
}

pub type IrResult<T> = Result<T, IrError>;

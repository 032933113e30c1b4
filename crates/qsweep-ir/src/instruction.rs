//! Operations with their operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    Gate(StandardGate),
    /// Qubit `i` is read into clbit `i` of the instruction's operand lists.
    Measure,
    /// Return the qubit to |0⟩.
    Reset,
    /// No-op that keeps passes from moving gates across it.
    Barrier,
}

/// One operation applied to specific wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    /// Written by measurements, empty otherwise.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    fn quantum(kind: InstructionKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::quantum(InstructionKind::Gate(gate), qubits)
    }

    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    pub fn two_qubit_gate(gate: StandardGate, first: QubitId, second: QubitId) -> Self {
        Self::gate(gate, [first, second])
    }

    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Measure several qubits at once. Both lists must have the same length.
    pub fn measure_many(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<Self> {
        let measure = Self {
            kind: InstructionKind::Measure,
            qubits: qubits.into_iter().collect(),
            clbits: clbits.into_iter().collect(),
        };
        if measure.qubits.len() == measure.clbits.len() {
            Ok(measure)
        } else {
            Err(IrError::MeasureArity {
                qubits: measure.qubits.len(),
                clbits: measure.clbits.len(),
            })
        }
    }

    pub fn reset(qubit: QubitId) -> Self {
        Self::quantum(InstructionKind::Reset, [qubit])
    }

    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::quantum(InstructionKind::Barrier, qubits)
    }

    #[inline]
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(gate) => Some(gate),
            _ => None,
        }
    }

    #[inline]
    pub fn is_gate(&self) -> bool {
        self.as_gate().is_some()
    }

    #[inline]
    pub fn is_measure(&self) -> bool {
        self.kind == InstructionKind::Measure
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.kind == InstructionKind::Barrier
    }

    /// OpenQASM name: the gate's name, or `measure`, `reset`, `barrier`.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(gate) => gate.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
        }
    }
}

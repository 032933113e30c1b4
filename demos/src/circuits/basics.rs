//! Small fixed circuits for the transpilation and sampling demos.

use qsweep_ir::{Circuit, ClbitId, IrResult, QubitId};

/// Bell pair with explicit `measure(0, 0)` and `measure(1, 1)`.
pub fn bell_measured() -> IrResult<Circuit> {
    Circuit::bell()
}

/// One qubit in superposition, measured into one classical bit.
pub fn hadamard_sample() -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("hadamard", 1, 1);
    circuit.h(QubitId(0))?.measure(QubitId(0), ClbitId(0))?;
    Ok(circuit)
}

/// GHZ preparation without measurement.
pub fn ghz_unmeasured(num_qubits: u32) -> IrResult<Circuit> {
    Circuit::ghz(num_qubits)
}

/// `cx(0, n-1)` across a register, then `measure_all`.
///
/// On a linear coupling map the endpoints are not adjacent, so routing has
/// to insert SWAPs.
pub fn long_range_cx(num_qubits: u32) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_size("long_range_cx", num_qubits, 0);
    circuit.cx(QubitId(0), QubitId(num_qubits.saturating_sub(1)))?;
    circuit.measure_all()?;
    Ok(circuit)
}

//! The [`Circuit`] builder.

use rustc_hash::FxHashSet;

use crate::dag::CircuitDag;
use crate::error::IrResult;
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// Fixed single-qubit gates: `name => variant`.
macro_rules! fixed_gates {
    ($($(#[$doc:meta])* $method:ident => $gate:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
                self.push_gate(StandardGate::$gate, &[qubit])
            }
        )*
    };
}

/// One-angle rotations: `name => variant`.
macro_rules! rotation_gates {
    ($($(#[$doc:meta])* $method:ident => $gate:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
                self.push_gate(StandardGate::$gate(theta), &[qubit])
            }
        )*
    };
}

/// Controlled gates: `name => variant`.
macro_rules! controlled_gates {
    ($($method:ident => $gate:ident),* $(,)?) => {
        $(
            pub fn $method(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
                self.push_gate(StandardGate::$gate, &[control, target])
            }
        )*
    };
}

/// A named quantum circuit with its qubit and classical-bit wires.
///
/// Builder methods check operands against the wires and return
/// `IrResult<&mut Self>`, so construction chains with `?`:
///
/// ```
/// use qsweep_ir::{Circuit, QubitId};
///
/// let mut c = Circuit::with_size("pair", 2, 0);
/// c.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?.measure_all()?;
/// assert_eq!(c.num_clbits(), 2);
/// # Ok::<(), qsweep_ir::IrError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    dag: CircuitDag,
}

impl Circuit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: Vec::new(),
            clbits: Vec::new(),
            dag: CircuitDag::new(),
        }
    }

    /// `num_qubits` anonymous qubits and `num_clbits` anonymous clbits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        (0..num_qubits).for_each(|_| {
            circuit.add_qubit();
        });
        (0..num_clbits).for_each(|_| {
            circuit.add_clbit();
        });
        circuit
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id));
        self.dag.add_qubit(id);
        id
    }

    pub fn add_clbit(&mut self) -> ClbitId {
        self.push_clbit(Clbit::new)
    }

    /// Append `size` clbits belonging to the register `name`.
    pub fn add_creg(&mut self, name: &str, size: u32) -> Vec<ClbitId> {
        (0..size)
            .map(|index| self.push_clbit(|id| Clbit::in_register(id, name, index)))
            .collect()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push_clbit(&mut self, wire: impl FnOnce(ClbitId) -> Clbit) -> ClbitId {
        let id = ClbitId(self.clbits.len() as u32);
        self.clbits.push(wire(id));
        self.dag.add_clbit(id);
        id
    }

    fn push_gate(&mut self, gate: StandardGate, qubits: &[QubitId]) -> IrResult<&mut Self> {
        self.append(Instruction::gate(gate, qubits.iter().copied()))
    }

    fixed_gates! {
        id => I,
        /// Hadamard.
        h => H,
        x => X,
        y => Y,
        z => Z,
        s => S,
        sdg => Sdg,
        t => T,
        tdg => Tdg,
        /// Square root of X.
        sx => SX,
        sxdg => SXdg,
    }

    rotation_gates! {
        rx => Rx,
        ry => Ry,
        rz => Rz,
        /// Phase gate diag(1, e^{iθ}).
        p => P,
    }

    controlled_gates! {
        cx => CX,
        cy => CY,
        cz => CZ,
    }

    /// Generic single-qubit rotation U(θ, φ, λ).
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::U(theta, phi, lambda), &[qubit])
    }

    pub fn swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Swap, &[a, b])
    }

    /// exp(-i θ/2 Z⊗Z).
    pub fn rzz(&mut self, theta: f64, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::RZZ(theta), &[a, b])
    }

    /// Toffoli.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::CCX, &[c1, c2, target])
    }

    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.append(Instruction::measure(qubit, clbit))
    }

    /// Barrier over every qubit, then qubit `i` into `meas[i]` of a new register.
    #[allow(clippy::cast_possible_truncation)]
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<QubitId> = self.qubits.iter().map(|q| q.id).collect();
        self.barrier(qubits.iter().copied())?;
        let clbits = self.add_creg("meas", qubits.len() as u32);
        self.append(Instruction::measure_many(qubits, clbits)?)
    }

    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::reset(qubit))
    }

    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.append(Instruction::barrier(qubits))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Instructions in an order consistent with every wire.
    pub fn instructions(&self) -> Vec<Instruction> {
        self.dag.instructions()
    }

    /// Gate names in application order. Measurements, resets and barriers are left out.
    pub fn gate_names(&self) -> Vec<&'static str> {
        self.dag
            .topological_ops()
            .filter_map(|(_, inst)| inst.as_gate())
            .map(StandardGate::name)
            .collect()
    }

    /// Every gate is in the Clifford group.
    pub fn is_clifford(&self) -> bool {
        self.dag
            .topological_ops()
            .filter_map(|(_, inst)| inst.as_gate())
            .all(StandardGate::is_clifford)
    }

    /// Once a qubit is measured, only barriers and further measurements touch it.
    pub fn has_terminal_measurements_only(&self) -> bool {
        let mut measured = FxHashSet::default();
        self.dag.topological_ops().all(|(_, inst)| {
            if inst.is_measure() {
                measured.extend(inst.qubits.iter().copied());
                true
            } else {
                inst.is_barrier() || !inst.qubits.iter().any(|q| measured.contains(q))
            }
        })
    }

    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    pub fn into_dag(self) -> CircuitDag {
        self.dag
    }

    /// Same name and wires, different body. `dag` must be built on the same wires.
    pub fn with_dag(&self, dag: CircuitDag) -> Self {
        Self {
            name: self.name.clone(),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            dag,
        }
    }

    /// H, CX, then each qubit measured into its own clbit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        circuit.measure(QubitId(0), ClbitId(0))?.measure(QubitId(1), ClbitId(1))?;
        Ok(circuit)
    }

    /// (|0…0⟩ + |1…1⟩)/√2 on `n` qubits, left unmeasured.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n, 0);
        if n > 0 {
            circuit.h(QubitId(0))?;
        }
        for i in 1..n {
            circuit.cx(QubitId(i - 1), QubitId(i))?;
        }
        Ok(circuit)
    }
}

//! One-call transpilation of a [`Circuit`].

use qsweep_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CompileResult;
use crate::manager::PassManager;
use crate::passes::RoutingStats;
use crate::target::{BasisGates, CouplingMap};

/// What to transpile for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranspileOptions {
    /// Allowed two-qubit interactions. `None` means all-to-all.
    pub coupling_map: Option<CouplingMap>,
    /// Target gate set. `None` keeps every gate.
    pub basis_gates: Option<BasisGates>,
    /// 0 disables gate cancellation.
    pub optimization_level: u8,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            coupling_map: None,
            basis_gates: None,
            optimization_level: 1,
        }
    }
}

impl TranspileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_coupling_map(mut self, coupling_map: CouplingMap) -> Self {
        self.coupling_map = Some(coupling_map);
        self
    }

    #[must_use]
    pub fn with_basis_gates(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = Some(basis_gates);
        self
    }

    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level;
        self
    }
}

/// Rewrite `circuit` for the target in `options`.
///
/// With a coupling map, the circuit is first padded with idle qubits up to
/// the map's size, so SWAP paths may pass through them. Qubit operands in
/// the result are physical qubits. Classical bits are untouched, so
/// measurement outcomes keep their meaning.
///
/// # Example
///
/// ```
/// use qsweep_compile::{transpile, CouplingMap, TranspileOptions};
/// use qsweep_ir::{Circuit, QubitId};
///
/// let mut circuit = Circuit::with_size("routing", 3, 0);
/// circuit.cx(QubitId(0), QubitId(2))?;
///
/// let options = TranspileOptions::new()
///     .with_coupling_map(CouplingMap::from_edges([(0, 1), (1, 2)]))
///     .with_optimization_level(0);
/// let routed = transpile(&circuit, &options)?;
/// assert_eq!(routed.gate_names(), vec!["swap", "cx"]);
/// # Ok::<(), qsweep_compile::CompileError>(())
/// ```
pub fn transpile(circuit: &Circuit, options: &TranspileOptions) -> CompileResult<Circuit> {
    let mut padded = circuit.clone();
    if let Some(cm) = &options.coupling_map {
        while padded.num_qubits() < cm.num_qubits() as usize {
            padded.add_qubit();
        }
    }

    let (pm, mut props) = PassManager::for_options(options);

    let mut dag = padded.dag().clone();
    pm.run(&mut dag, &mut props)?;

    if let Some(stats) = props.get::<RoutingStats>() {
        debug!(circuit = circuit.name(), swaps = stats.swaps_inserted, "routed");
    }
    Ok(padded.with_dag(dag))
}

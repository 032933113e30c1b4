//! Transpilation targets derived from backend capabilities.

use qsweep_compile::{BasisGates, CouplingMap, TranspileOptions};
use qsweep_hal::Capabilities;

/// Options that make a circuit runnable on a backend with `caps`.
///
/// All-to-all backends get no coupling map, and backends without a native
/// subset keep every gate.
pub fn transpile_options_for(caps: &Capabilities) -> TranspileOptions {
    let mut options = TranspileOptions::new();
    if let Some(edges) = caps.topology.edges() {
        options = options.with_coupling_map(CouplingMap::from_edges(edges.iter().copied()));
    }
    if let Some(basis) = caps.gates.basis() {
        options = options.with_basis_gates(BasisGates::new(basis.iter().cloned()));
    }
    options
}

/// Coupling map from an explicit edge list, e.g. `[[0, 1], [1, 2]]`.
pub fn coupling_map(edges: &[[u32; 2]]) -> CouplingMap {
    CouplingMap::from_edges(edges.iter().map(|&[a, b]| (a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsweep_hal::{GateSet, Topology};

    #[test]
    fn test_simulator_target_is_unconstrained() {
        let options = transpile_options_for(&Capabilities::simulator(5));
        assert!(options.coupling_map.is_none());
        assert!(options.basis_gates.is_none());
    }

    #[test]
    fn test_device_target() {
        let caps = Capabilities::simulator(3)
            .with_topology(Topology::linear(3))
            .with_gates(GateSet::rz_sx_cx());
        let options = transpile_options_for(&caps);
        let cm = options.coupling_map.unwrap();
        assert!(cm.is_connected(0, 1));
        assert!(!cm.is_connected(0, 2));
        assert!(options.basis_gates.unwrap().contains("sx"));
    }
}

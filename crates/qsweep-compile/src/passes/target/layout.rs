//! Initial placement of logical qubits.

use qsweep_ir::CircuitDag;
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;
use crate::property::{Layout, PropertySet};

/// Places logical qubit `i` on physical qubit `i`.
pub struct TrivialLayout;

impl Pass for TrivialLayout {
    fn name(&self) -> &'static str {
        "TrivialLayout"
    }

    #[allow(clippy::cast_possible_truncation)]
    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let device = properties
            .coupling_map
            .as_ref()
            .ok_or(CompileError::MissingCouplingMap)?
            .num_qubits();

        let circuit = dag.num_qubits();
        if circuit > device as usize {
            return Err(CompileError::TooManyQubits { circuit, device });
        }

        debug!(qubits = circuit, device, "placing qubits in order");
        properties.layout = Some(Layout::trivial(circuit as u32));
        Ok(())
    }

    fn is_needed(&self, _dag: &CircuitDag, properties: &PropertySet) -> bool {
        properties.coupling_map.is_some() && properties.layout.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::CouplingMap;
    use qsweep_ir::{Circuit, QubitId};

    fn props_for(device: CouplingMap) -> PropertySet {
        let mut props = PropertySet::new();
        props.coupling_map = Some(device);
        props
    }

    #[test]
    fn test_identity_placement() {
        let mut dag = Circuit::with_size("three", 3, 0).into_dag();
        let mut props = props_for(CouplingMap::linear(5));

        TrivialLayout.run(&mut dag, &mut props).unwrap();

        let layout = props.layout.as_ref().unwrap();
        assert_eq!(layout.len(), 3);
        assert!(layout.pairs().all(|(l, p)| l.0 == p));
        assert!(!TrivialLayout.is_needed(&dag, &props));
    }

    #[test]
    fn test_rejects_oversized_circuit() {
        let mut dag = Circuit::with_size("ten", 10, 0).into_dag();
        let mut props = props_for(CouplingMap::linear(5));
        assert!(matches!(
            TrivialLayout.run(&mut dag, &mut props),
            Err(CompileError::TooManyQubits { circuit: 10, device: 5 })
        ));
    }

    #[test]
    fn test_needs_coupling_map() {
        let mut dag = Circuit::with_size("pair", 2, 0).into_dag();
        let mut props = PropertySet::new();
        assert!(!TrivialLayout.is_needed(&dag, &props));
        assert!(matches!(
            TrivialLayout.run(&mut dag, &mut props),
            Err(CompileError::MissingCouplingMap)
        ));
        assert_eq!(props.layout.as_ref().and_then(|l| l.physical(QubitId(0))), None);
    }
}

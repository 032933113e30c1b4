//! Ordered pass pipelines.

use tracing::{debug, info, instrument};

use qsweep_ir::CircuitDag;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{BasicRouting, BasisTranslation, CancelInverses, TrivialLayout, Unroll3q};
use crate::property::PropertySet;
use crate::transpile::TranspileOptions;

/// Runs passes in insertion order over one DAG.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pipeline [`transpile`](crate::transpile) runs, and the properties it starts from.
    ///
    /// A coupling map brings in `Unroll3q`, `TrivialLayout` and `BasicRouting`.
    /// Basis gates bring in `BasisTranslation`. `CancelInverses` runs from
    /// optimization level 1 upwards; higher levels add nothing yet.
    pub fn for_options(options: &TranspileOptions) -> (Self, PropertySet) {
        let mut pm = Self::new();
        if options.coupling_map.is_some() {
            pm = pm.then(Unroll3q).then(TrivialLayout).then(BasicRouting);
        }
        if options.basis_gates.is_some() {
            pm = pm.then(BasisTranslation);
        }
        if options.optimization_level > 0 {
            pm = pm.then(CancelInverses);
        }

        let mut properties = PropertySet::new();
        properties.coupling_map = options.coupling_map.clone();
        properties.basis_gates = options.basis_gates.clone();
        (pm, properties)
    }

    /// Append a pass.
    #[must_use]
    pub fn then(mut self, pass: impl Pass + 'static) -> Self {
        self.push(pass);
        self
    }

    pub fn push(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    #[instrument(skip_all, fields(passes = self.passes.len(), qubits = dag.num_qubits()))]
    pub fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        for pass in &self.passes {
            if !pass.is_needed(dag, properties) {
                debug!(pass = pass.name(), "not needed");
                continue;
            }
            pass.run(dag, properties)?;
            debug!(pass = pass.name(), ops = dag.num_ops(), "pass done");
        }

        info!(depth = dag.depth(), ops = dag.num_ops(), "pipeline finished");
        Ok(())
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{BasisGates, CouplingMap};
    use qsweep_ir::{Circuit, QubitId};

    #[test]
    fn test_empty_pipeline_leaves_dag_alone() {
        let mut circuit = Circuit::with_size("pair", 2, 0);
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        let mut dag = circuit.into_dag();

        let pm = PassManager::new();
        pm.run(&mut dag, &mut PropertySet::new()).unwrap();
        assert!(pm.is_empty());
        assert_eq!(dag.num_ops(), 2);
    }

    #[test]
    fn test_full_target_pipeline() {
        let options = TranspileOptions::new()
            .with_coupling_map(CouplingMap::linear(3))
            .with_basis_gates(BasisGates::rz_sx_cx());
        let (pm, props) = PassManager::for_options(&options);

        assert_eq!(
            pm.pass_names(),
            ["Unroll3q", "TrivialLayout", "BasicRouting", "BasisTranslation", "CancelInverses"]
        );
        assert!(props.coupling_map.is_some());
        assert!(props.basis_gates.is_some());
    }

    #[test]
    fn test_level_zero_without_target_is_empty() {
        let options = TranspileOptions::new().with_optimization_level(0);
        let (pm, _) = PassManager::for_options(&options);
        assert!(pm.is_empty());
    }
}

//! The [`Pass`] trait.

use qsweep_ir::CircuitDag;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// One step of a compilation pipeline.
///
/// A pass may rewrite the DAG, record facts in the [`PropertySet`], or both.
pub trait Pass: Send + Sync {
    /// Stable name used in logs and [`PassManager::pass_names`](crate::PassManager::pass_names).
    fn name(&self) -> &'static str;

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()>;

    /// Whether running the pass could change anything. Skipped passes are logged.
    fn is_needed(&self, _dag: &CircuitDag, _properties: &PropertySet) -> bool {
        true
    }
}

//! Ground and excited states of a molecular problem.
//!
//! The ground state comes from VQE; the excited states from exact
//! diagonalization of the same qubit Hamiltonian. All energies are reported
//! as totals (electronic plus nuclear repulsion).

use tracing::info;

use crate::circuits::{NUM_UCCSD_PARAMS, uccsd_ansatz};
use crate::error::DemoResult;
use crate::optimizers::Slsqp;
use crate::problems::ElectronicStructureProblem;
use crate::runners::vqe::{VqeResult, VqeRunner};

/// One eigenstate of the problem.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyLevel {
    /// 0 for the ground state.
    pub index: usize,
    pub total_energy: f64,
    pub electronic_energy: f64,
    /// Gap above the ground state.
    pub excitation_energy: f64,
}

#[derive(Debug, Clone)]
pub struct ExcitedStatesResult {
    /// Ascending; index 0 is the VQE ground state.
    pub levels: Vec<EnergyLevel>,
    pub ground_state: VqeResult,
    /// Exact ground state, for comparison with the VQE estimate.
    pub exact_ground_energy: f64,
}

impl ExcitedStatesResult {
    pub fn ground(&self) -> &EnergyLevel {
        &self.levels[0]
    }

    pub fn excited(&self) -> &[EnergyLevel] {
        &self.levels[1..]
    }
}

/// VQE for the ground state, exact eigensolver for the rest.
pub struct ExcitedStatesSolver {
    problem: ElectronicStructureProblem,
    optimizer: Slsqp,
}

impl ExcitedStatesSolver {
    pub fn new(problem: ElectronicStructureProblem) -> Self {
        Self {
            problem,
            optimizer: Slsqp::new(),
        }
    }

    #[must_use]
    pub fn with_optimizer(mut self, optimizer: Slsqp) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn problem(&self) -> &ElectronicStructureProblem {
        &self.problem
    }

    pub fn solve(&self) -> DemoResult<ExcitedStatesResult> {
        let runner = VqeRunner::new(
            self.problem.hamiltonian.clone(),
            uccsd_ansatz,
            self.optimizer.clone(),
            vec![0.0; NUM_UCCSD_PARAMS],
        );
        let ground_state = runner.run()?;
        let spectrum = self.problem.hamiltonian.eigenvalues()?;

        let ground = ground_state.energy;
        let electronic =
            std::iter::once(ground).chain(spectrum.iter().skip(1).copied());
        let levels = electronic
            .enumerate()
            .map(|(index, e)| EnergyLevel {
                index,
                total_energy: self.problem.total_energy(e),
                electronic_energy: e,
                excitation_energy: e - ground,
            })
            .collect();

        info!(
            ground,
            exact = spectrum.first().copied(),
            levels = spectrum.len(),
            "excited states solved"
        );
        Ok(ExcitedStatesResult {
            levels,
            exact_ground_energy: spectrum.first().copied().unwrap_or(ground),
            ground_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::h2_sto3g;

    #[test]
    fn test_h2_levels() {
        let result = ExcitedStatesSolver::new(h2_sto3g().unwrap()).solve().unwrap();
        let expected = [
            -1.137_306_035_753_4,
            -0.524_615_555_364_346,
            -0.162_753_155_795_883,
            0.495_057_741_618_113,
        ];
        assert_eq!(result.levels.len(), 4);
        for (level, want) in result.levels.iter().zip(expected) {
            assert!((level.total_energy - want).abs() < 1e-6, "{level:?}");
        }
        assert!(result.levels.windows(2).all(|w| w[0].total_energy < w[1].total_energy));
        assert_eq!(result.ground().excitation_energy, 0.0);
        assert_eq!(result.excited().len(), 3);
    }
}

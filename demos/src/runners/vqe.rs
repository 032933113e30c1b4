//! VQE (Variational Quantum Eigensolver) runner.
//!
//! The optimizer proposes parameters, the ansatz builder turns them into a
//! circuit, and the energy is the exact expectation value of the
//! Hamiltonian on the resulting statevector.

use qsweep_ir::Circuit;
use qsweep_sim::{Hamiltonian, Statevector};
use tracing::{debug, info};

use crate::error::{DemoError, DemoResult};
use crate::optimizers::Optimizer;

/// Result of a VQE run.
#[derive(Debug, Clone)]
pub struct VqeResult {
    pub optimal_params: Vec<f64>,
    /// Energy at `optimal_params`, without any constant offset.
    pub energy: f64,
    /// Number of energy evaluations.
    pub evaluations: usize,
    pub iterations: usize,
    pub converged: bool,
    /// Best energy after each improving iteration.
    pub history: Vec<f64>,
}

/// Ground-state search for `hamiltonian` over an ansatz family.
pub struct VqeRunner<O, A> {
    hamiltonian: Hamiltonian,
    ansatz: A,
    optimizer: O,
    initial_point: Vec<f64>,
}

impl<O, A> VqeRunner<O, A>
where
    O: Optimizer,
    A: Fn(&[f64]) -> DemoResult<Circuit>,
{
    pub fn new(hamiltonian: Hamiltonian, ansatz: A, optimizer: O, initial_point: Vec<f64>) -> Self {
        Self {
            hamiltonian,
            ansatz,
            optimizer,
            initial_point,
        }
    }

    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    pub fn num_parameters(&self) -> usize {
        self.initial_point.len()
    }

    /// Energy of the ansatz state at `params`.
    pub fn energy(&self, params: &[f64]) -> DemoResult<f64> {
        let circuit = (self.ansatz)(params)?;
        let state = Statevector::from_circuit(&circuit)?;
        Ok(self.hamiltonian.expectation(&state)?)
    }

    pub fn run(&self) -> DemoResult<VqeResult> {
        info!(
            optimizer = self.optimizer.name(),
            params = self.num_parameters(),
            terms = self.hamiltonian.n_terms(),
            "starting VQE"
        );

        // The optimizer only sees f64 values; keep the first failure aside.
        let mut failure: Option<DemoError> = None;
        let objective = |params: &[f64]| -> f64 {
            if failure.is_some() {
                return f64::INFINITY;
            }
            match self.energy(params) {
                Ok(energy) => energy,
                Err(e) => {
                    failure = Some(e);
                    f64::INFINITY
                }
            }
        };
        let result = self
            .optimizer
            .minimize(objective, self.initial_point.clone());
        if let Some(e) = failure {
            return Err(e);
        }

        debug!(
            energy = result.value,
            evaluations = result.evaluations,
            converged = result.converged,
            "VQE finished"
        );
        Ok(VqeResult {
            optimal_params: result.params,
            energy: result.value,
            evaluations: result.evaluations,
            iterations: result.iterations,
            converged: result.converged,
            history: result.history,
        })
    }
}

//! Derivative-free and quasi-Newton minimisers for the variational loop.

pub mod cobyla;
pub mod slsqp;

pub use cobyla::Cobyla;
pub use slsqp::Slsqp;

/// What a minimiser found and what it cost.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub params: Vec<f64>,
    pub value: f64,
    /// Objective calls, including any spent on finite differences.
    pub evaluations: usize,
    pub iterations: usize,
    /// Running best value, one entry per improvement, starting with the
    /// value at the initial point.
    pub history: Vec<f64>,
    pub converged: bool,
}

/// Minimises a scalar objective with no constraints.
pub trait Optimizer {
    fn name(&self) -> &'static str;

    fn minimize<F>(&self, objective: F, initial: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64;
}

/// Position of the smallest value, NaNs treated as largest.
pub(crate) fn argmin(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map_or(0, |(i, _)| i)
}

//! Quasi-Newton optimizer in the style of SLSQP.
//!
//! Without constraints, sequential least-squares quadratic programming
//! reduces to a BFGS iteration: the quadratic model uses an inverse-Hessian
//! estimate, and each step is accepted by a backtracking line search.
//! Gradients come from forward differences, so every iteration costs
//! `n + 1` evaluations plus the line search.

use tracing::{debug, trace};

use super::{OptimizationResult, Optimizer};

/// Armijo sufficient-decrease constant.
const ARMIJO_C1: f64 = 1e-4;
/// Line search gives up below this step length.
const MIN_STEP: f64 = 1e-10;

/// SLSQP optimizer configuration.
#[derive(Debug, Clone)]
pub struct Slsqp {
    pub maxiter: usize,
    /// Gradient-norm threshold for convergence.
    pub tol: f64,
    /// Forward-difference step, scaled by `max(1, |xᵢ|)`.
    pub eps: f64,
}

impl Default for Slsqp {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-6,
            eps: f64::EPSILON.sqrt(),
        }
    }
}

impl Slsqp {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    fn gradient<F>(&self, objective: &mut F, x: &[f64], fx: f64) -> Vec<f64>
    where
        F: FnMut(&[f64]) -> f64,
    {
        let mut shifted = x.to_vec();
        (0..x.len())
            .map(|i| {
                let step = self.eps * x[i].abs().max(1.0);
                shifted[i] = x[i] + step;
                let df = objective(&shifted) - fx;
                shifted[i] = x[i];
                df / step
            })
            .collect()
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn identity(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

/// `H ← (I - ρ s yᵀ) H (I - ρ y sᵀ) + ρ s sᵀ` with `ρ = 1 / yᵀs`.
fn bfgs_update(h: &[Vec<f64>], s: &[f64], y: &[f64], rho: f64) -> Vec<Vec<f64>> {
    let n = s.len();
    let a: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| (if i == j { 1.0 } else { 0.0 }) - rho * s[i] * y[j])
                .collect()
        })
        .collect();
    let ah: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| (0..n).map(|k| a[i][k] * h[k][j]).sum()).collect())
        .collect();
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| (0..n).map(|k| ah[i][k] * a[j][k]).sum::<f64>() + rho * s[i] * s[j])
                .collect()
        })
        .collect()
}

impl Optimizer for Slsqp {
    fn name(&self) -> &'static str {
        "SLSQP"
    }

    fn minimize<F>(&self, mut objective: F, initial: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = initial.len();
        let mut x = initial;
        let mut fx = objective(&x);
        let mut grad = self.gradient(&mut objective, &x, fx);
        let mut num_evaluations = 1 + n;
        let mut h_inv = identity(n);
        let mut history = vec![fx];
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.maxiter {
            let grad_norm = dot(&grad, &grad).sqrt();
            if grad_norm < self.tol {
                converged = true;
                break;
            }

            let mut direction: Vec<f64> = h_inv.iter().map(|row| -dot(row, &grad)).collect();
            let mut slope = dot(&grad, &direction);
            if slope >= 0.0 {
                // Not a descent direction; restart from steepest descent.
                h_inv = identity(n);
                direction = grad.iter().map(|g| -g).collect();
                slope = -grad_norm * grad_norm;
            }

            let mut alpha = 1.0;
            let (x_new, f_new) = loop {
                let candidate: Vec<f64> = x
                    .iter()
                    .zip(&direction)
                    .map(|(xi, di)| xi + alpha * di)
                    .collect();
                let f_candidate = objective(&candidate);
                num_evaluations += 1;
                if f_candidate <= fx + ARMIJO_C1 * alpha * slope {
                    break (Some(candidate), f_candidate);
                }
                alpha *= 0.5;
                if alpha < MIN_STEP {
                    break (None, f_candidate);
                }
            };
            let Some(x_new) = x_new else {
                debug!(iterations, grad_norm, "line search failed");
                break;
            };

            let grad_new = self.gradient(&mut objective, &x_new, f_new);
            num_evaluations += n;

            let s: Vec<f64> = x_new.iter().zip(&x).map(|(a, b)| a - b).collect();
            let y: Vec<f64> = grad_new.iter().zip(&grad).map(|(a, b)| a - b).collect();
            let sy = dot(&s, &y);
            if sy > 1e-12 {
                h_inv = bfgs_update(&h_inv, &s, &y, 1.0 / sy);
            }

            x = x_new;
            fx = f_new;
            grad = grad_new;
            history.push(fx);
            iterations += 1;
            trace!(iterations, energy = fx, alpha, "accepted step");
        }

        OptimizationResult {
            params: x,
            value: fx,
            evaluations: num_evaluations,
            iterations,
            history,
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_converges_fast() {
        let result = Slsqp::new().minimize(
            |p| (p[0] - 1.0).powi(2) + (p[1] - 2.0).powi(2),
            vec![0.0, 0.0],
        );
        assert!(result.converged);
        assert!((result.params[0] - 1.0).abs() < 1e-5);
        assert!((result.params[1] - 2.0).abs() < 1e-5);
        assert!(result.iterations <= 5);
    }

    #[test]
    fn test_rosenbrock() {
        let result = Slsqp::new().with_maxiter(200).minimize(
            |p| (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0].powi(2)).powi(2),
            vec![0.0, 0.0],
        );
        assert!(result.value < 1e-4);
        assert!((result.params[0] - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_starts_at_optimum() {
        let result = Slsqp::new().minimize(|p| p[0] * p[0], vec![0.0]);
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.evaluations, 2);
    }
}

//! Derivative-free minimisation in the spirit of COBYLA.
//!
//! A simplex search with every reflection clipped to a trust radius `rho`.
//! Once the simplex values flatten, `rho` halves (never below `rhoend`) and a
//! fresh simplex is laid out around the best vertex. A flat simplex at the
//! final radius counts as converged.

use tracing::trace;

use super::{OptimizationResult, Optimizer, argmin};

/// Trust-region simplex minimiser.
///
/// ```
/// use qsweep_demos::optimizers::{Cobyla, Optimizer};
///
/// let cobyla = Cobyla::new().with_maxiter(200);
/// let result = cobyla.minimize(|x| (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2), vec![0.0; 2]);
/// assert!(result.value < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct Cobyla {
    /// Iteration budget.
    pub maxiter: usize,
    /// Value spread under which the simplex is flat.
    pub tol: f64,
    /// Starting trust radius.
    pub rhobeg: f64,
    /// Smallest trust radius.
    pub rhoend: f64,
}

impl Default for Cobyla {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-6,
            rhobeg: 0.5,
            rhoend: 1e-4,
        }
    }
}

impl Cobyla {
    /// Defaults: 100 iterations, `rhobeg` 0.5, `rhoend` 1e-4.
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

    /// Set the starting and final trust radius.
    #[must_use]
    pub fn with_trust_region(mut self, rhobeg: f64, rhoend: f64) -> Self {
        self.rhobeg = rhobeg;
        self.rhoend = rhoend;
        self
    }
}

/// `from + t·(to − from)`, componentwise.
fn toward(from: &[f64], to: &[f64], t: f64) -> Vec<f64> {
    from.iter().zip(to).map(|(a, b)| a + t * (b - a)).collect()
}

/// Counts objective calls.
struct Counted<F> {
    objective: F,
    calls: usize,
}

impl<F: FnMut(&[f64]) -> f64> Counted<F> {
    fn eval(&mut self, x: &[f64]) -> f64 {
        self.calls += 1;
        (self.objective)(x)
    }
}

struct Simplex {
    points: Vec<Vec<f64>>,
    values: Vec<f64>,
}

impl Simplex {
    /// `origin` and one vertex `rho` away along each axis.
    fn around<F>(origin: Vec<f64>, value: f64, rho: f64, f: &mut Counted<F>) -> Self
    where
        F: FnMut(&[f64]) -> f64,
    {
        let mut points = vec![origin];
        let mut values = vec![value];
        for axis in 0..points[0].len() {
            let mut vertex = points[0].clone();
            vertex[axis] += rho;
            values.push(f.eval(&vertex));
            points.push(vertex);
        }
        Self { points, values }
    }

    /// Indices sorted best first.
    fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by(|&a, &b| self.values[a].total_cmp(&self.values[b]));
        order
    }

    /// Mean of every vertex except `excluded`.
    fn centroid_without(&self, excluded: usize) -> Vec<f64> {
        let n = self.points.len() - 1;
        let mut centroid = vec![0.0; self.points[0].len()];
        let kept = self
            .points
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != excluded)
            .map(|(_, p)| p);
        for point in kept {
            for (c, x) in centroid.iter_mut().zip(point) {
                *c += x / n as f64;
            }
        }
        centroid
    }

    fn set(&mut self, idx: usize, point: Vec<f64>, value: f64) {
        self.points[idx] = point;
        self.values[idx] = value;
    }
}

impl Optimizer for Cobyla {
    fn name(&self) -> &'static str {
        "COBYLA"
    }

    fn minimize<F>(&self, objective: F, initial: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        let mut f = Counted { objective, calls: 0 };
        let n = initial.len();
        let start = f.eval(&initial);
        let mut history = vec![start];

        let mut simplex = Simplex::around(initial, start, self.rhobeg, &mut f);
        let mut rho = self.rhobeg;
        let mut converged = false;

        for iteration in 0..self.maxiter {
            let order = simplex.ranking();
            let (best, second_worst, worst) = (order[0], order[n.saturating_sub(1)], order[n]);

            if simplex.values[worst] - simplex.values[best] < self.tol {
                if rho <= self.rhoend {
                    converged = true;
                    break;
                }
                rho = (rho / 2.0).max(self.rhoend);
                trace!(iteration, rho, "trust radius reduced");
                let origin = simplex.points[best].clone();
                simplex = Simplex::around(origin, simplex.values[best], rho, &mut f);
                continue;
            }

            let centroid = simplex.centroid_without(worst);
            let reflected: Vec<f64> = centroid
                .iter()
                .zip(&simplex.points[worst])
                .map(|(c, w)| c + (c - w).clamp(-rho, rho))
                .collect();
            let f_reflected = f.eval(&reflected);

            if f_reflected < simplex.values[best] {
                let expanded = toward(&centroid, &reflected, 2.0);
                let f_expanded = f.eval(&expanded);
                if f_expanded < f_reflected {
                    simplex.set(worst, expanded, f_expanded);
                } else {
                    simplex.set(worst, reflected, f_reflected);
                }
            } else if f_reflected < simplex.values[second_worst] {
                simplex.set(worst, reflected, f_reflected);
            } else {
                let contracted = toward(&centroid, &simplex.points[worst], 0.5);
                let f_contracted = f.eval(&contracted);
                if f_contracted < simplex.values[worst] {
                    simplex.set(worst, contracted, f_contracted);
                } else {
                    let anchor = simplex.points[best].clone();
                    for idx in (0..=n).filter(|&i| i != best) {
                        let halfway = toward(&anchor, &simplex.points[idx], 0.5);
                        let value = f.eval(&halfway);
                        simplex.set(idx, halfway, value);
                    }
                }
            }

            let current = simplex.values[argmin(&simplex.values)];
            if history.last().is_some_and(|&last| current < last) {
                history.push(current);
            }
        }

        let best = argmin(&simplex.values);
        OptimizationResult {
            params: simplex.points[best].clone(),
            value: simplex.values[best],
            evaluations: f.calls,
            iterations: history.len(),
            history,
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cobyla_simple() {
        let cobyla = Cobyla::new().with_maxiter(200);

        // Minimize (x-1)^2 + (y-2)^2
        let result = cobyla.minimize(
            |params| (params[0] - 1.0).powi(2) + (params[1] - 2.0).powi(2),
            vec![0.0, 0.0],
        );

        assert!(result.value < 0.01);
        assert!((result.params[0] - 1.0).abs() < 0.1);
        assert!((result.params[1] - 2.0).abs() < 0.1);
    }

    #[test]
    fn test_cobyla_rosenbrock() {
        let cobyla = Cobyla::new().with_maxiter(500);

        let result = cobyla.minimize(
            |p| (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0].powi(2)).powi(2),
            vec![0.0, 0.0],
        );

        // Rosenbrock is hard, just check we improved
        assert!(result.value < 1.0);
    }

    #[test]
    fn test_history_is_monotone() {
        let result = Cobyla::new().minimize(|p| p[0].cos() + p[1].sin(), vec![0.1, 0.1]);
        assert!(result.history.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(result.iterations, result.history.len());
    }
}

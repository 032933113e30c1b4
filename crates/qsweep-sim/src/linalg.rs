//! Dense eigenvalue solver for small Hermitian matrices.
//!
//! Uses the cyclic Jacobi method on real symmetric matrices. A complex
//! Hermitian `H = A + iB` is handled through its real embedding
//!
//! ```text
//! ⎡ A  -B ⎤
//! ⎣ B   A ⎦
//! ```
//!
//! whose spectrum is the spectrum of `H` with every eigenvalue doubled.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{SimError, SimResult};

const MAX_SWEEPS: usize = 100;
const TOLERANCE: f64 = 1e-14;

/// Eigenvalues of a real symmetric matrix, ascending.
pub fn symmetric_eigenvalues(matrix: &Array2<f64>) -> SimResult<Vec<f64>> {
    let n = matrix.nrows();
    let mut a = matrix.clone();
    let scale = a.iter().map(|x| x * x).sum::<f64>().sqrt().max(1.0);

    for sweep in 0..MAX_SWEEPS {
        if off_diagonal_norm(&a) <= TOLERANCE * scale {
            let mut values: Vec<f64> = a.diag().to_vec();
            values.sort_by(f64::total_cmp);
            tracing::trace!(sweeps = sweep, n, "jacobi converged");
            return Ok(values);
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq.abs() < f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
            }
        }
    }

    Err(SimError::NoConvergence(MAX_SWEEPS))
}

/// Eigenvalues of a complex Hermitian matrix, ascending.
pub fn hermitian_eigenvalues(matrix: &Array2<Complex64>) -> SimResult<Vec<f64>> {
    let n = matrix.nrows();
    let mut embedded = Array2::<f64>::zeros((2 * n, 2 * n));
    for ((i, j), z) in matrix.indexed_iter() {
        embedded[[i, j]] = z.re;
        embedded[[i + n, j + n]] = z.re;
        embedded[[i, j + n]] = -z.im;
        embedded[[i + n, j]] = z.im;
    }

    let doubled = symmetric_eigenvalues(&embedded)?;
    Ok(doubled.into_iter().step_by(2).collect())
}

fn off_diagonal_norm(a: &Array2<f64>) -> f64 {
    a.indexed_iter()
        .filter(|((i, j), _)| i != j)
        .map(|(_, x)| x * x)
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_symmetric_2x2() {
        let m = array![[2.0, 1.0], [1.0, 2.0]];
        let values = symmetric_eigenvalues(&m).unwrap();
        assert!((values[0] - 1.0).abs() < 1e-12);
        assert!((values[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_is_sorted() {
        let m = array![[3.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 2.0]];
        assert_eq!(symmetric_eigenvalues(&m).unwrap(), vec![-1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_pauli_y_spectrum() {
        let i = Complex64::new(0.0, 1.0);
        let zero = Complex64::new(0.0, 0.0);
        let y = array![[zero, -i], [i, zero]];
        let values = hermitian_eigenvalues(&y).unwrap();
        assert_eq!(values.len(), 2);
        assert!((values[0] + 1.0).abs() < 1e-12);
        assert!((values[1] - 1.0).abs() < 1e-12);
    }
}

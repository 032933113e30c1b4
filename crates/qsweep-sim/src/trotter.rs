//! Product-formula circuits for `exp(-i H t)`.
//!
//! With `H = Σ_k c_k P_k` and `n` steps of width `τ = t/n`:
//!
//! ```text
//! first order:   [ Π_k e^{-i c_k P_k τ} ]^n                           error O(t²/n)
//! second order:  [ Π_k e^{-i c_k P_k τ/2} · Π_k^rev e^{-i c_k P_k τ/2} ]^n   error O(t³/n²)
//! ```

use qsweep_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::statevector::Statevector;
use crate::synthesis::append_exp_pauli;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrotterOrder {
    /// Lie-Trotter.
    #[default]
    First,
    /// Symmetric Suzuki-Trotter.
    Second,
}

impl TrotterOrder {
    /// Sweeps over the term list per step.
    fn sweeps(self) -> usize {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

/// Synthesises and runs Trotterised time evolution.
///
/// ```
/// use qsweep_sim::{Hamiltonian, Statevector, TrotterEvolution, TrotterOrder};
///
/// let h = Hamiltonian::from_labels([("ZZ", 1.0), ("IX", 0.5)])?;
/// let evolution = TrotterEvolution::new(h, 1.0, 8).with_order(TrotterOrder::Second);
/// assert_eq!(evolution.circuit()?.num_qubits(), 2);
/// let state = evolution.evolve(&Statevector::new(2))?;
/// let norm: f64 = state.amplitudes().iter().map(|a| a.norm_sqr()).sum();
/// assert!((norm - 1.0).abs() < 1e-12);
/// # Ok::<(), qsweep_sim::SimError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TrotterEvolution {
    hamiltonian: Hamiltonian,
    time: f64,
    steps: usize,
    order: TrotterOrder,
    width: Option<u32>,
}

impl TrotterEvolution {
    /// First-order evolution for time `time` in `steps` steps.
    pub fn new(hamiltonian: Hamiltonian, time: f64, steps: usize) -> Self {
        Self {
            hamiltonian,
            time,
            steps,
            order: TrotterOrder::First,
            width: None,
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: TrotterOrder) -> Self {
        self.order = order;
        self
    }

    /// Circuit width, when it should exceed the widest term.
    #[must_use]
    pub fn with_width(mut self, num_qubits: u32) -> Self {
        self.width = Some(num_qubits);
        self
    }

    pub fn order(&self) -> TrotterOrder {
        self.order
    }

    pub fn circuit(&self) -> SimResult<Circuit> {
        if self.hamiltonian.n_terms() == 0 {
            return Err(SimError::EmptyHamiltonian);
        }
        if self.steps == 0 {
            return Err(SimError::ZeroSteps);
        }

        let width = self.width.unwrap_or_else(|| self.hamiltonian.num_qubits());
        let sweeps = self.order.sweeps();
        let slice = self.time / (self.steps * sweeps) as f64;
        let terms = self.hamiltonian.terms();
        debug!(
            terms = terms.len(),
            steps = self.steps,
            width,
            order = ?self.order,
            "building Trotter circuit"
        );

        let name = match self.order {
            TrotterOrder::First => "trotter1",
            TrotterOrder::Second => "trotter2",
        };
        let mut circuit = Circuit::with_size(name, width, 0);
        for _ in 0..self.steps {
            for sweep in 0..sweeps {
                // Odd sweeps run the terms backwards.
                let ordered: Box<dyn Iterator<Item = _>> = if sweep % 2 == 0 {
                    Box::new(terms.iter())
                } else {
                    Box::new(terms.iter().rev())
                };
                for term in ordered {
                    append_exp_pauli(&mut circuit, term, slice, width)?;
                }
            }
        }
        Ok(circuit)
    }

    pub fn evolve(&self, initial: &Statevector) -> SimResult<Statevector> {
        let circuit = self.circuit()?;
        let mut state = initial.clone();
        state.apply_circuit(&circuit)?;
        Ok(state)
    }
}

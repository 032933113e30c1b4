//! Statevector simulation engine.
//!
//! Amplitudes are indexed little-endian: bit `q` of the basis index is the
//! state of qubit `q`.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use num_complex::Complex64;
use rand::Rng;

use qsweep_ir::{Circuit, InstructionKind, StandardGate};

use crate::error::{SimError, SimResult};

type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A pure state of `n` qubits as 2^n complex amplitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Evolve |0...0⟩ through the gates of `circuit`.
    ///
    /// Barriers are skipped. Measurements and resets are rejected; use
    /// [`Statevector::measure`] and [`Statevector::reset`] to simulate them
    /// one shot at a time.
    pub fn from_circuit(circuit: &Circuit) -> SimResult<Self> {
        let mut state = Self::new(circuit.num_qubits());
        state.apply_circuit(circuit)?;
        Ok(state)
    }

    /// Apply the gates of `circuit` to this state.
    pub fn apply_circuit(&mut self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_qubits() > self.num_qubits {
            return Err(SimError::QubitOutOfRange {
                qubit: circuit.num_qubits() as u32 - 1,
                n_qubits: self.num_qubits as u32,
            });
        }
        for inst in circuit.dag().instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.0 as usize).collect();
                    self.apply_gate(gate, &qubits);
                }
                InstructionKind::Barrier => {}
                InstructionKind::Measure | InstructionKind::Reset => {
                    return Err(SimError::NonUnitary(inst.name()));
                }
            }
        }
        Ok(())
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Born-rule probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply a gate to the given qubits.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match *gate {
            StandardGate::CX => self.apply_controlled(qubits[0], qubits[1], pauli_x()),
            StandardGate::CY => self.apply_controlled(qubits[0], qubits[1], pauli_y()),
            StandardGate::CZ => self.apply_controlled(qubits[0], qubits[1], diagonal(ONE, -ONE)),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
            StandardGate::RZZ(theta) => self.apply_rzz(qubits[0], qubits[1], theta),
            StandardGate::CCX => self.apply_ccx(qubits[0], qubits[1], qubits[2]),
            _ => {
                if let Some(m) = single_qubit_matrix(gate) {
                    self.apply_single(qubits[0], m);
                }
            }
        }
    }

    fn apply_single(&mut self, qubit: usize, m: Matrix2) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_controlled(&mut self, control: usize, target: usize, m: Matrix2) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_rzz(&mut self, q1: usize, q2: usize, theta: f64) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        let even = Complex64::from_polar(1.0, -theta / 2.0);
        let odd = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            let parity = ((i & mask1) != 0) ^ ((i & mask2) != 0);
            *amp *= if parity { odd } else { even };
        }
    }

    fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let c1_mask = 1 << c1;
        let c2_mask = 1 << c2;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & c1_mask != 0) && (i & c2_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    /// Probability that measuring `qubit` yields 1.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Projectively measure `qubit`, collapse the state and return the outcome.
    pub fn measure(&mut self, qubit: usize, rng: &mut impl Rng) -> bool {
        let p1 = self.probability_of_one(qubit);
        let outcome = rng.r#gen::<f64>() < p1;
        let norm = if outcome { p1 } else { 1.0 - p1 }.sqrt();

        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if ((i & mask) != 0) == outcome {
                *amp /= norm;
            } else {
                *amp = ZERO;
            }
        }
        outcome
    }

    /// Measure `qubit` and flip it back to |0⟩ if it was found in |1⟩.
    pub fn reset(&mut self, qubit: usize, rng: &mut impl Rng) {
        if self.measure(qubit, rng) {
            self.apply_single(qubit, pauli_x());
        }
    }

    /// Sample one basis state from the Born distribution.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        let r: f64 = rng.r#gen();
        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }
        // Rounding can leave the total just under 1.
        self.last_nonzero()
    }

    /// Sample `shots` basis states, building the cumulative distribution once.
    pub fn sample_many(&self, shots: usize, rng: &mut impl Rng) -> Vec<usize> {
        let mut cdf = Vec::with_capacity(self.amplitudes.len());
        let mut total = 0.0;
        for amp in &self.amplitudes {
            total += amp.norm_sqr();
            cdf.push(total);
        }
        let fallback = self.last_nonzero();

        (0..shots)
            .map(|_| {
                let r = rng.r#gen::<f64>() * total;
                let idx = cdf.partition_point(|&c| c <= r);
                if idx < cdf.len() { idx } else { fallback }
            })
            .collect()
    }

    fn last_nonzero(&self) -> usize {
        self.amplitudes
            .iter()
            .rposition(|a| a.norm_sqr() > 0.0)
            .unwrap_or(0)
    }

    /// Big-endian bitstring of a basis index: qubit 0 is the rightmost character.
    pub fn bitstring(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits)
    }
}

fn diagonal(d0: Complex64, d1: Complex64) -> Matrix2 {
    [[d0, ZERO], [ZERO, d1]]
}

fn pauli_x() -> Matrix2 {
    [[ZERO, ONE], [ONE, ZERO]]
}

fn pauli_y() -> Matrix2 {
    [[ZERO, -I], [I, ZERO]]
}

fn rotation_x(theta: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    [[c, s], [s, c]]
}

fn single_qubit_matrix(gate: &StandardGate) -> Option<Matrix2> {
    let phase = |theta: f64| Complex64::from_polar(1.0, theta);
    let m = match *gate {
        StandardGate::I => diagonal(ONE, ONE),
        StandardGate::X => pauli_x(),
        StandardGate::Y => pauli_y(),
        StandardGate::Z => diagonal(ONE, -ONE),
        StandardGate::H => {
            let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
            [[h, h], [h, -h]]
        }
        StandardGate::S => diagonal(ONE, I),
        StandardGate::Sdg => diagonal(ONE, -I),
        StandardGate::T => diagonal(ONE, phase(PI / 4.0)),
        StandardGate::Tdg => diagonal(ONE, phase(-PI / 4.0)),
        StandardGate::SX => {
            let a = Complex64::new(0.5, 0.5);
            let b = Complex64::new(0.5, -0.5);
            [[a, b], [b, a]]
        }
        StandardGate::SXdg => {
            let a = Complex64::new(0.5, -0.5);
            let b = Complex64::new(0.5, 0.5);
            [[a, b], [b, a]]
        }
        StandardGate::Rx(theta) => rotation_x(theta),
        StandardGate::Ry(theta) => {
            let c = Complex64::new((theta / 2.0).cos(), 0.0);
            let s = Complex64::new((theta / 2.0).sin(), 0.0);
            [[c, -s], [s, c]]
        }
        StandardGate::Rz(theta) => diagonal(phase(-theta / 2.0), phase(theta / 2.0)),
        StandardGate::P(theta) => diagonal(ONE, phase(theta)),
        StandardGate::U(theta, phi, lambda) => {
            let c = (theta / 2.0).cos();
            let s = (theta / 2.0).sin();
            [
                [Complex64::new(c, 0.0), -phase(lambda) * s],
                [phase(phi) * s, phase(phi + lambda) * c],
            ]
        }
        _ => return None,
    };
    Some(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsweep_ir::{ClbitId, QubitId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert_eq!(sv.amplitudes(), &[ONE, ZERO, ZERO, ZERO]);
    }

    #[test]
    fn test_bell_state() {
        let sv = Statevector::from_circuit(&Circuit::ghz(2).unwrap()).unwrap();
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitudes()[0], h));
        assert!(approx_eq(sv.amplitudes()[1], ZERO));
        assert!(approx_eq(sv.amplitudes()[2], ZERO));
        assert!(approx_eq(sv.amplitudes()[3], h));
    }

    #[test]
    fn test_sx_squared_is_x() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&StandardGate::SX, &[0]);
        sv.apply_gate(&StandardGate::SX, &[0]);
        assert!(approx_eq(sv.amplitudes()[0], ZERO));
        assert!(approx_eq(sv.amplitudes()[1], ONE));
    }

    #[test]
    fn test_cx_is_little_endian() {
        // X on qubit 0 then CX(0, 1) gives |11⟩ = index 3.
        let mut sv = Statevector::new(2);
        sv.apply_gate(&StandardGate::X, &[0]);
        sv.apply_gate(&StandardGate::CX, &[0, 1]);
        assert!(approx_eq(sv.amplitudes()[3], ONE));
        assert_eq!(sv.bitstring(1), "01");
    }

    #[test]
    fn test_measurement_rejected() {
        let mut circuit = Circuit::with_size("m", 1, 1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(matches!(
            Statevector::from_circuit(&circuit),
            Err(SimError::NonUnitary("measure"))
        ));
    }

    #[test]
    fn test_measure_collapses() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sv = Statevector::from_circuit(&Circuit::ghz(2).unwrap()).unwrap();
        let first = sv.measure(0, &mut rng);
        assert_eq!(sv.measure(1, &mut rng), first);
        assert!((sv.probabilities().iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sv = Statevector::new(1);
        sv.apply_gate(&StandardGate::H, &[0]);
        sv.reset(0, &mut rng);
        assert!((sv.amplitudes()[0].norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_sample_deterministic() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sv = Statevector::new(2);
        sv.apply_gate(&StandardGate::X, &[1]);
        assert!(sv.sample_many(50, &mut rng).iter().all(|&i| i == 2));
        assert_eq!(sv.sample(&mut rng), 2);
    }
}

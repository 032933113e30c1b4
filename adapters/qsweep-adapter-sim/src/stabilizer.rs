//! Stabilizer tableau simulation of Clifford circuits.
//!
//! Aaronson-Gottesman (CHP) representation: `n` destabilizer rows followed by
//! `n` stabilizer rows, each an `n`-qubit Pauli string stored as X bits,
//! Z bits and a sign bit. Gates cost O(n) and measurements O(n²), so Clifford
//! circuits scale polynomially where the statevector doubles per qubit.

use rand::Rng;

use qsweep_ir::StandardGate;

/// Stabilizer state of `n` qubits.
#[derive(Debug, Clone)]
pub(crate) struct Tableau {
    n: usize,
    /// Row-major `2n × n` X bits.
    xs: Vec<bool>,
    /// Row-major `2n × n` Z bits.
    zs: Vec<bool>,
    /// Sign bit of each row; `true` means a −1 phase.
    signs: Vec<bool>,
}

impl Tableau {
    /// |0...0⟩: destabilizer i = X_i, stabilizer i = Z_i.
    pub(crate) fn new(n: usize) -> Self {
        let mut xs = vec![false; 2 * n * n];
        let mut zs = vec![false; 2 * n * n];
        for i in 0..n {
            xs[i * n + i] = true;
            zs[(n + i) * n + i] = true;
        }
        Self {
            n,
            xs,
            zs,
            signs: vec![false; 2 * n],
        }
    }

    #[inline]
    fn x(&self, row: usize, q: usize) -> bool {
        self.xs[row * self.n + q]
    }

    #[inline]
    fn z(&self, row: usize, q: usize) -> bool {
        self.zs[row * self.n + q]
    }

    /// Apply a Clifford gate. Returns `false` for gates outside the Clifford set.
    pub(crate) fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) -> bool {
        match *gate {
            StandardGate::I => {}
            StandardGate::X => self.pauli(qubits[0], false, true),
            StandardGate::Y => self.pauli(qubits[0], true, true),
            StandardGate::Z => self.pauli(qubits[0], true, false),
            StandardGate::H => self.h(qubits[0]),
            StandardGate::S => self.s(qubits[0]),
            StandardGate::Sdg => {
                self.s(qubits[0]);
                self.pauli(qubits[0], true, false);
            }
            // SX = H·S·H, SXdg = H·Sdg·H
            StandardGate::SX => {
                self.h(qubits[0]);
                self.s(qubits[0]);
                self.h(qubits[0]);
            }
            StandardGate::SXdg => {
                self.h(qubits[0]);
                self.s(qubits[0]);
                self.pauli(qubits[0], true, false);
                self.h(qubits[0]);
            }
            StandardGate::CX => self.cx(qubits[0], qubits[1]),
            StandardGate::CY => {
                let (c, t) = (qubits[0], qubits[1]);
                self.s(t);
                self.pauli(t, true, false);
                self.cx(c, t);
                self.s(t);
            }
            StandardGate::CZ => {
                let (c, t) = (qubits[0], qubits[1]);
                self.h(t);
                self.cx(c, t);
                self.h(t);
            }
            StandardGate::Swap => {
                let (a, b) = (qubits[0], qubits[1]);
                self.cx(a, b);
                self.cx(b, a);
                self.cx(a, b);
            }
            _ => return false,
        }
        true
    }

    /// Conjugate by a Pauli: rows anticommuting with it flip sign.
    ///
    /// Z anticommutes with rows holding an X bit on `q`, X with rows holding
    /// a Z bit, and Y with rows holding exactly one of them.
    fn pauli(&mut self, q: usize, flips_on_x: bool, flips_on_z: bool) {
        for row in 0..2 * self.n {
            let anticommutes =
                (flips_on_x && self.x(row, q)) ^ (flips_on_z && self.z(row, q));
            if anticommutes {
                self.signs[row] ^= true;
            }
        }
    }

    fn h(&mut self, q: usize) {
        let n = self.n;
        for row in 0..2 * n {
            let idx = row * n + q;
            if self.xs[idx] && self.zs[idx] {
                self.signs[row] ^= true;
            }
            std::mem::swap(&mut self.xs[idx], &mut self.zs[idx]);
        }
    }

    fn s(&mut self, q: usize) {
        let n = self.n;
        for row in 0..2 * n {
            let idx = row * n + q;
            if self.xs[idx] && self.zs[idx] {
                self.signs[row] ^= true;
            }
            self.zs[idx] ^= self.xs[idx];
        }
    }

    fn cx(&mut self, c: usize, t: usize) {
        let n = self.n;
        for row in 0..2 * n {
            let (ic, it) = (row * n + c, row * n + t);
            let (xc, zc, xt, zt) = (self.xs[ic], self.zs[ic], self.xs[it], self.zs[it]);
            if xc && zt && (xt == zc) {
                self.signs[row] ^= true;
            }
            self.xs[it] = xt ^ xc;
            self.zs[ic] = zc ^ zt;
        }
    }

    /// Left-multiply row `target` by row `source`.
    fn row_mult(&mut self, target: usize, source: usize) {
        let n = self.n;
        let mut phase = 2 * i32::from(self.signs[target]) + 2 * i32::from(self.signs[source]);
        for q in 0..n {
            phase += g(
                self.x(source, q),
                self.z(source, q),
                self.x(target, q),
                self.z(target, q),
            );
        }
        self.signs[target] = phase.rem_euclid(4) == 2;
        for q in 0..n {
            let (src, dst) = (source * n + q, target * n + q);
            self.xs[dst] ^= self.xs[src];
            self.zs[dst] ^= self.zs[src];
        }
    }

    /// Measure `q` in the computational basis, collapsing the state.
    pub(crate) fn measure(&mut self, q: usize, rng: &mut impl Rng) -> bool {
        let n = self.n;
        match (n..2 * n).find(|&row| self.x(row, q)) {
            Some(p) => {
                for row in 0..2 * n {
                    if row != p && self.x(row, q) {
                        self.row_mult(row, p);
                    }
                }
                // Destabilizer p-n takes the old stabilizer; stabilizer p becomes ±Z_q.
                let dest = p - n;
                for col in 0..n {
                    self.xs[dest * n + col] = self.xs[p * n + col];
                    self.zs[dest * n + col] = self.zs[p * n + col];
                    self.xs[p * n + col] = false;
                    self.zs[p * n + col] = false;
                }
                self.signs[dest] = self.signs[p];
                self.zs[p * n + q] = true;

                let outcome: bool = rng.r#gen();
                self.signs[p] = outcome;
                outcome
            }
            None => self.deterministic_outcome(q),
        }
    }

    /// Sign of ±Z_q in the stabilizer group, when Z_q commutes with every generator.
    fn deterministic_outcome(&self, q: usize) -> bool {
        let n = self.n;
        let mut xs = vec![false; n];
        let mut zs = vec![false; n];
        let mut sign = false;

        for i in (0..n).filter(|&i| self.x(i, q)) {
            let row = n + i;
            let mut phase = 2 * i32::from(sign) + 2 * i32::from(self.signs[row]);
            for col in 0..n {
                phase += g(self.x(row, col), self.z(row, col), xs[col], zs[col]);
            }
            sign = phase.rem_euclid(4) == 2;
            for col in 0..n {
                xs[col] ^= self.x(row, col);
                zs[col] ^= self.z(row, col);
            }
        }
        sign
    }

    /// Measure and flip back to |0⟩ if the outcome was 1.
    pub(crate) fn reset(&mut self, q: usize, rng: &mut impl Rng) {
        if self.measure(q, rng) {
            self.pauli(q, false, true);
        }
    }
}

/// Power of `i` picked up when multiplying Pauli (x1, z1) into (x2, z2).
#[inline]
fn g(x1: bool, z1: bool, x2: bool, z2: bool) -> i32 {
    let (x2, z2) = (i32::from(x2), i32::from(z2));
    match (x1, z1) {
        (false, false) => 0,
        (true, true) => z2 - x2,
        (true, false) => z2 * (2 * x2 - 1),
        (false, true) => x2 * (1 - 2 * z2),
    }
}

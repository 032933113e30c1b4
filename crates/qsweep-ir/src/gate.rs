//! The gate set.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Every gate the IR can hold.
///
/// Angles are plain radians; parametrised circuits are rebuilt per parameter
/// vector rather than bound later. Variants are grouped as Paulis, the other
/// single-qubit Cliffords, single-qubit non-Cliffords, two-qubit gates and
/// the Toffoli.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    I,
    X,
    Y,
    Z,

    H,
    /// √Z.
    S,
    Sdg,
    /// √X.
    SX,
    SXdg,

    /// ⁴√Z.
    T,
    Tdg,
    Rx(f64),
    Ry(f64),
    Rz(f64),
    /// diag(1, e^{iθ}).
    P(f64),
    /// U(θ, φ, λ) = Rz(φ)·Ry(θ)·Rz(λ) up to phase.
    U(f64, f64, f64),

    CX,
    CY,
    CZ,
    Swap,
    /// exp(-i θ/2 Z⊗Z).
    RZZ(f64),

    CCX,
}

impl StandardGate {
    /// OpenQASM spelling.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::I => "id",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::H => "h",
            Self::S => "s",
            Self::Sdg => "sdg",
            Self::SX => "sx",
            Self::SXdg => "sxdg",
            Self::T => "t",
            Self::Tdg => "tdg",
            Self::Rx(_) => "rx",
            Self::Ry(_) => "ry",
            Self::Rz(_) => "rz",
            Self::P(_) => "p",
            Self::U(..) => "u",
            Self::CX => "cx",
            Self::CY => "cy",
            Self::CZ => "cz",
            Self::Swap => "swap",
            Self::RZZ(_) => "rzz",
            Self::CCX => "ccx",
        }
    }

    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Self::CCX => 3,
            Self::CX | Self::CY | Self::CZ | Self::Swap | Self::RZZ(_) => 2,
            _ => 1,
        }
    }

    /// Angles, in the order the variant stores them.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            Self::U(theta, phi, lambda) => vec![theta, phi, lambda],
            Self::Rx(a) | Self::Ry(a) | Self::Rz(a) | Self::P(a) | Self::RZZ(a) => vec![a],
            _ => Vec::new(),
        }
    }

    /// Decided by variant alone: `rz(π/2)` is not Clifford here even though
    /// it equals `s` up to phase.
    pub fn is_clifford(&self) -> bool {
        use StandardGate::*;
        matches!(
            self,
            I | X | Y | Z | H | S | Sdg | SX | SXdg | CX | CY | CZ | Swap
        )
    }

    pub fn inverse(&self) -> Self {
        match *self {
            Self::S => Self::Sdg,
            Self::Sdg => Self::S,
            Self::T => Self::Tdg,
            Self::Tdg => Self::T,
            Self::SX => Self::SXdg,
            Self::SXdg => Self::SX,
            Self::Rx(a) => Self::Rx(-a),
            Self::Ry(a) => Self::Ry(-a),
            Self::Rz(a) => Self::Rz(-a),
            Self::P(a) => Self::P(-a),
            Self::RZZ(a) => Self::RZZ(-a),
            Self::U(theta, phi, lambda) => Self::U(-theta, -lambda, -phi),
            hermitian => hermitian,
        }
    }

    /// Two in a row on the same operands cancel.
    pub fn is_self_inverse(&self) -> bool {
        self.params().is_empty() && self.inverse() == *self
    }

    /// Drawer label such as `H`, `√X` or `Rz(π/4)`.
    pub fn label(&self) -> String {
        let base = match self {
            Self::SX => "√X".to_string(),
            Self::SXdg => "√Xdg".to_string(),
            Self::Sdg => "Sdg".to_string(),
            Self::Tdg => "Tdg".to_string(),
            Self::RZZ(_) => "Rzz".to_string(),
            other => capitalize(other.name()),
        };
        let params = self.params();
        if params.is_empty() {
            return base;
        }
        let args: Vec<String> = params.into_iter().map(format_angle).collect();
        format!("{base}({})", args.join(","))
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// `π/2`, `-3π/4` and similar for small multiples of π/8, else three decimals
/// with trailing zeros dropped.
pub fn format_angle(angle: f64) -> String {
    const TOL: f64 = 1e-9;
    for (den, suffix) in [(1.0, ""), (2.0, "/2"), (4.0, "/4"), (8.0, "/8")] {
        let multiple = angle * den / PI;
        let k = multiple.round();
        if k == 0.0 || k.abs() > 8.0 || (multiple - k).abs() >= TOL {
            continue;
        }
        let sign = if k < 0.0 { "-" } else { "" };
        let m = k.abs();
        return if m == 1.0 {
            format!("{sign}π{suffix}")
        } else {
            format!("{sign}{m}π{suffix}")
        };
    }
    let fixed = format!("{angle:.3}");
    match fixed.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

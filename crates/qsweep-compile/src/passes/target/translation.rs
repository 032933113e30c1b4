//! Basis translation.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use qsweep_ir::{CircuitDag, Instruction, QubitId, StandardGate};
use tracing::trace;

use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;
use crate::property::PropertySet;
use crate::target::BasisGates;

/// Rewrites are applied at most this many times to a single gate.
const MAX_EXPANSION_DEPTH: usize = 6;

const EPSILON: f64 = 1e-10;

/// Rewrites every gate outside the target basis into basis gates.
///
/// Multi-qubit gates are expanded into CX (or CZ when the basis lacks CX)
/// plus single-qubit gates. Single-qubit gates become either one `u` or a
/// `rz`/`sx` sequence, whichever the basis offers. Results are equal to the
/// input up to global phase.
pub struct BasisTranslation;

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "BasisTranslation"
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let basis = properties
            .basis_gates
            .as_ref()
            .ok_or(CompileError::MissingBasisGates)?;

        let mut translated = Vec::with_capacity(dag.num_ops());
        for inst in dag.instructions() {
            expand(inst, basis, 0, &mut translated)?;
        }

        *dag = dag.rebuild(translated)?;
        Ok(())
    }

    fn is_needed(&self, _dag: &CircuitDag, properties: &PropertySet) -> bool {
        properties.basis_gates.is_some()
    }
}

fn expand(
    inst: Instruction,
    basis: &BasisGates,
    depth: usize,
    out: &mut Vec<Instruction>,
) -> CompileResult<()> {
    let Some(&gate) = inst.as_gate() else {
        out.push(inst);
        return Ok(());
    };
    if basis.contains(gate.name()) {
        out.push(inst);
        return Ok(());
    }
    if depth >= MAX_EXPANSION_DEPTH {
        return Err(CompileError::Untranslatable(gate.name().to_string()));
    }

    let replacement = decompose(gate, &inst.qubits, basis)
        .ok_or_else(|| CompileError::Untranslatable(gate.name().to_string()))?;
    trace!(gate = gate.name(), len = replacement.len(), "decomposed");
    for r in replacement {
        expand(r, basis, depth + 1, out)?;
    }
    Ok(())
}

/// One rewrite step for `gate`. The result may still need translating.
fn decompose(
    gate: StandardGate,
    qubits: &[QubitId],
    basis: &BasisGates,
) -> Option<Vec<Instruction>> {
    use StandardGate as G;

    let one = |g: StandardGate, q: QubitId| Instruction::single_qubit_gate(g, q);
    let two = |g: StandardGate, a: QubitId, b: QubitId| Instruction::two_qubit_gate(g, a, b);

    let seq = match (gate, qubits) {
        (G::I, [_]) => vec![],
        (G::CX, &[c, t]) if basis.contains("cz") => {
            vec![one(G::H, t), two(G::CZ, c, t), one(G::H, t)]
        }
        (G::CZ, &[c, t]) => vec![one(G::H, t), two(G::CX, c, t), one(G::H, t)],
        (G::CY, &[c, t]) => vec![one(G::Sdg, t), two(G::CX, c, t), one(G::S, t)],
        (G::Swap, &[a, b]) => vec![two(G::CX, a, b), two(G::CX, b, a), two(G::CX, a, b)],
        (G::RZZ(theta), &[a, b]) => vec![two(G::CX, a, b), one(G::Rz(theta), b), two(G::CX, a, b)],
        (G::CCX, &[a, b, c]) => ccx_decomposition(a, b, c),
        (g, &[q]) => single_qubit(g, q, basis)?,
        _ => return None,
    };
    Some(seq)
}

/// Toffoli as 6 CX plus H, T and Tdg.
pub(crate) fn ccx_decomposition(a: QubitId, b: QubitId, c: QubitId) -> Vec<Instruction> {
    use StandardGate as G;
    let one = |g: StandardGate, q: QubitId| Instruction::single_qubit_gate(g, q);
    let cx = |x: QubitId, y: QubitId| Instruction::two_qubit_gate(G::CX, x, y);
    vec![
        one(G::H, c),
        cx(b, c),
        one(G::Tdg, c),
        cx(a, c),
        one(G::T, c),
        cx(b, c),
        one(G::Tdg, c),
        cx(a, c),
        one(G::T, b),
        one(G::T, c),
        one(G::H, c),
        cx(a, b),
        one(G::T, a),
        one(G::Tdg, b),
        cx(a, b),
    ]
}

fn single_qubit(gate: StandardGate, q: QubitId, basis: &BasisGates) -> Option<Vec<Instruction>> {
    let (theta, phi, lambda) = euler_angles(gate)?;
    let one = |g: StandardGate| Instruction::single_qubit_gate(g, q);

    if basis.contains("u") {
        return Some(vec![one(StandardGate::U(theta, phi, lambda))]);
    }
    if !basis.contains("rz") {
        return None;
    }

    // Diagonal gates are a single Z rotation.
    if theta.abs() < EPSILON {
        let angle = normalize(phi + lambda);
        return Some(if angle.abs() < EPSILON {
            vec![]
        } else {
            vec![one(StandardGate::Rz(angle))]
        });
    }
    if !basis.contains("sx") {
        return None;
    }

    // U(θ,φ,λ) = RZ(φ+π)·SX·RZ(θ+π)·SX·RZ(λ)
    Some(vec![
        one(StandardGate::Rz(normalize(lambda))),
        one(StandardGate::SX),
        one(StandardGate::Rz(normalize(theta + PI))),
        one(StandardGate::SX),
        one(StandardGate::Rz(normalize(phi + PI))),
    ])
}

/// ZYZ angles `(θ, φ, λ)` with `gate = U(θ, φ, λ)` up to global phase.
fn euler_angles(gate: StandardGate) -> Option<(f64, f64, f64)> {
    use StandardGate as G;
    let angles = match gate {
        G::I => (0.0, 0.0, 0.0),
        G::X => (PI, 0.0, PI),
        G::Y => (PI, FRAC_PI_2, FRAC_PI_2),
        G::Z => (0.0, 0.0, PI),
        G::H => (FRAC_PI_2, 0.0, PI),
        G::S => (0.0, 0.0, FRAC_PI_2),
        G::Sdg => (0.0, 0.0, -FRAC_PI_2),
        G::T => (0.0, 0.0, FRAC_PI_4),
        G::Tdg => (0.0, 0.0, -FRAC_PI_4),
        G::SX => (FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2),
        G::SXdg => (FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2),
        G::Rx(t) => (t, -FRAC_PI_2, FRAC_PI_2),
        G::Ry(t) => (t, 0.0, 0.0),
        G::Rz(t) | G::P(t) => (0.0, 0.0, t),
        G::U(t, p, l) => (t, p, l),
        _ => return None,
    };
    Some(angles)
}

/// Wrap an angle into (-π, π].
fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * PI);
    if wrapped > PI { wrapped - 2.0 * PI } else { wrapped }
}

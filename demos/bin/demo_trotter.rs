//! Hand-built Trotter circuits, checked against product-formula synthesis.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, ValueEnum};

use qsweep_demos::circuits::{field_rotation_steps, zz_plus_x_step};
use qsweep_demos::render::probability_bars;
use qsweep_demos::{init_tracing, print_block, print_header, print_result, print_section};
use qsweep_sim::{Hamiltonian, Statevector, TrotterEvolution, TrotterOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Independent Z and X fields on two qubits
    Fields,
    /// One step of H = Z⊗Z + X₀
    ZzX,
    /// First- against second-order synthesis of H = Z⊗Z + X₀
    Compare,
    All,
}

#[derive(Parser, Debug)]
#[command(name = "demo-trotter")]
#[command(about = "Time evolution with Trotter circuits")]
struct Args {
    #[arg(long, value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Evolution time
    #[arg(short, long, default_value_t = 1.0)]
    time: f64,

    /// Trotter steps for the field mode
    #[arg(long, default_value_t = 10)]
    steps: usize,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    print_header("Trotter Evolution");

    if matches!(args.mode, Mode::Fields | Mode::All) {
        fields(args.time, args.steps)?;
    }
    if matches!(args.mode, Mode::ZzX | Mode::All) {
        zz_x(args.time)?;
    }
    if matches!(args.mode, Mode::Compare | Mode::All) {
        compare(args.time)?;
    }
    Ok(())
}

fn fields(t: f64, steps: usize) -> anyhow::Result<()> {
    print_section(&format!("Fields: t = {t}, {steps} steps"));
    let circuit = field_rotation_steps(t, steps)?;
    let state = Statevector::from_circuit(&circuit)?;
    print_block(&format_state(&state));
    Ok(())
}

fn zz_x(t: f64) -> anyhow::Result<()> {
    print_section(&format!("Z⊗Z + X₀: t = {t}"));
    let circuit = zz_plus_x_step(t)?;
    print_block(&circuit.draw());

    let state = Statevector::from_circuit(&circuit)?;
    print_block(&format_state(&state));

    let zz = Hamiltonian::from_labels([("ZZ", 1.0)])?;
    print_result("⟨Z⊗Z⟩", format!("{:.6}", zz.expectation(&state)?));

    let rows: Vec<(String, f64)> = state
        .probabilities()
        .into_iter()
        .enumerate()
        .map(|(i, p)| (format!("|{}⟩", state.bitstring(i)), p))
        .collect();
    print_block(&probability_bars(&rows, 40));
    Ok(())
}

fn compare(t: f64) -> anyhow::Result<()> {
    print_section(&format!("Product formulas for Z⊗Z + X₀: t = {t}"));
    let hamiltonian = Hamiltonian::from_labels([("ZZ", 1.0), ("IX", 1.0)])?;
    let initial = Statevector::new(2);
    let reference = TrotterEvolution::new(hamiltonian.clone(), t, 1000)
        .with_order(TrotterOrder::Second)
        .evolve(&initial)?;

    println!("  {:>6}  {:>14}  {:>14}", "steps", "1st-order err", "2nd-order err");
    for steps in [1, 2, 4, 8, 16] {
        let first = TrotterEvolution::new(hamiltonian.clone(), t, steps);
        let second = first.clone().with_order(TrotterOrder::Second);
        println!(
            "  {steps:>6}  {:>14.3e}  {:>14.3e}",
            infidelity(&first.evolve(&initial)?, &reference),
            infidelity(&second.evolve(&initial)?, &reference)
        );
    }
    Ok(())
}

/// `1 - |⟨a|b⟩|²`
fn infidelity(a: &Statevector, b: &Statevector) -> f64 {
    let overlap: num_complex::Complex64 = a
        .amplitudes()
        .iter()
        .zip(b.amplitudes())
        .map(|(x, y)| x.conj() * y)
        .sum();
    (1.0 - overlap.norm_sqr()).max(0.0)
}

fn format_state(state: &Statevector) -> String {
    state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(i, a)| format!("|{}⟩  {:+.6} {:+.6}i", state.bitstring(i), a.re, a.im))
        .collect::<Vec<_>>()
        .join("\n")
}

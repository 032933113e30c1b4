//! Sample a single qubit in superposition.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;

use qsweep_adapter_sim::SimulatorBackend;
use qsweep_compile::transpile;
use qsweep_demos::circuits::hadamard_sample;
use qsweep_demos::runners::SimulatorSession;
use qsweep_demos::target::transpile_options_for;
use qsweep_demos::{init_tracing, print_block, print_header, print_result, print_section};
use qsweep_hal::Backend;

#[derive(Parser, Debug)]
#[command(name = "demo-sample")]
#[command(about = "Measure H|0⟩ many times")]
struct Args {
    /// Number of shots
    #[arg(short, long, default_value_t = 100_000)]
    shots: u32,

    /// Seed for the simulator RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    print_header("Single-Qubit Sampling");

    let circuit = hadamard_sample()?;
    print_block(&circuit.draw());

    let mut backend = SimulatorBackend::new();
    if let Some(seed) = args.seed {
        backend = backend.with_seed(seed);
    }
    let compiled = transpile(&circuit, &transpile_options_for(backend.capabilities()))?;
    let session = SimulatorSession::with_backend(backend)?;
    let result = session.execute(&compiled, args.shots)?;

    print_section("Results");
    print_result("Counts", &result.counts);
    for (outcome, p) in result.counts.probabilities() {
        print_result(&format!("P({outcome})"), format!("{p:.4}"));
    }
    Ok(())
}

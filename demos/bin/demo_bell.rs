//! Bell pair: transpile for the simulator, then sample.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;

use qsweep_adapter_sim::SimulatorBackend;
use qsweep_compile::transpile;
use qsweep_demos::circuits::bell_measured;
use qsweep_demos::runners::SimulatorSession;
use qsweep_demos::target::transpile_options_for;
use qsweep_demos::{init_tracing, print_block, print_header, print_result, print_section};
use qsweep_hal::Backend;

#[derive(Parser, Debug)]
#[command(name = "demo-bell")]
#[command(about = "Transpile and sample a Bell circuit")]
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

    print_header("Bell State");

    let circuit = bell_measured()?;
    print_section("Original circuit");
    print_block(&circuit.draw());

    let mut backend = SimulatorBackend::new();
    if let Some(seed) = args.seed {
        backend = backend.with_seed(seed);
    }
    let transpiled = transpile(&circuit, &transpile_options_for(backend.capabilities()))?;
    print_section("Transpiled circuit");
    print_block(&transpiled.draw());

    let session = SimulatorSession::with_backend(backend)?;
    let result = session.execute(&transpiled, args.shots)?;

    print_section("Results");
    print_result("Measurement result", &result.counts);
    Ok(())
}

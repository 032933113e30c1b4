//! GHZ preparation before and after transpilation.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;

use qsweep_adapter_sim::SimulatorBackend;
use qsweep_compile::transpile;
use qsweep_demos::circuits::ghz_unmeasured;
use qsweep_demos::target::transpile_options_for;
use qsweep_demos::{init_tracing, print_block, print_header, print_section};
use qsweep_hal::Backend;

#[derive(Parser, Debug)]
#[command(name = "demo-ghz-transpile")]
#[command(about = "Transpile a GHZ circuit for the simulator")]
struct Args {
    /// Number of qubits
    #[arg(short = 'n', long, default_value_t = 3)]
    qubits: u32,

    /// Optimization level (0 disables gate cancellation)
    #[arg(short = 'O', long, default_value_t = 0)]
    optimization_level: u8,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    print_header("GHZ Transpilation");

    let circuit = ghz_unmeasured(args.qubits)?;
    print_section("Original circuit");
    print_block(&circuit.draw());

    let backend = SimulatorBackend::new();
    let options = transpile_options_for(backend.capabilities())
        .with_optimization_level(args.optimization_level);
    let transpiled = transpile(&circuit, &options)?;
    print_section("Transpiled circuit");
    print_block(&transpiled.draw());
    Ok(())
}

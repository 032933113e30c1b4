//! Routing a long-range CX on a linear coupling map.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;

use qsweep_compile::{TranspileOptions, transpile};
use qsweep_demos::circuits::long_range_cx;
use qsweep_demos::target::coupling_map;
use qsweep_demos::{init_tracing, print_block, print_header, print_result, print_section};

#[derive(Parser, Debug)]
#[command(name = "demo-routing")]
#[command(about = "Insert SWAPs for a CX between unconnected qubits")]
struct Args {
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

    print_header("Routing");

    let circuit = long_range_cx(3)?;
    let edges = [[0, 1], [1, 2]];
    print_result("Coupling map", format!("{edges:?}"));

    print_section("Original circuit");
    print_block(&circuit.draw());

    let options = TranspileOptions::new()
        .with_coupling_map(coupling_map(&edges))
        .with_optimization_level(args.optimization_level);
    let routed = transpile(&circuit, &options)?;

    print_section("Routed circuit");
    print_block(&routed.draw());
    let swaps = routed.gate_names().iter().filter(|g| **g == "swap").count();
    print_result("SWAPs inserted", swaps);
    Ok(())
}

//! Clifford vs non-Clifford comparison at a single register size.
//!
//! Builds both circuits, prints their diagrams, simulates each once and
//! shows the outcome histograms next to a timing summary.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;

use qsweep_adapter_sim::SimulationMethod;
use qsweep_demos::runners::sweep::{
    DEFAULT_SHOTS, build_nonstabilizer_circuit, build_stabilizer_circuit,
};
use qsweep_demos::runners::{
    SimulatorOptions, SimulatorSession, SweepRecord, render_histograms, render_timing_summary,
    simulate,
};
use qsweep_demos::{
    init_tracing, print_block, print_header, print_result, print_section, print_success,
};

#[derive(Parser, Debug)]
#[command(name = "demo-compare")]
#[command(about = "Compare simulation time of a Clifford circuit and its one-T variant")]
struct Args {
    /// Number of qubits
    #[arg(short = 'n', long, default_value_t = 6)]
    qubits: u32,

    /// Shots per simulation
    #[arg(short, long, default_value_t = DEFAULT_SHOTS)]
    shots: u32,

    /// Simulation method (automatic, statevector, stabilizer)
    #[arg(long, default_value = "automatic")]
    method: SimulationMethod,

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

    print_header("Clifford vs Non-Clifford");

    let clifford = build_stabilizer_circuit(args.qubits)?;
    let non_clifford = build_nonstabilizer_circuit(args.qubits)?;

    print_section(&format!("Clifford circuit ({} qubits)", args.qubits));
    print_block(&clifford.draw());
    print_section(&format!("Non-Clifford circuit ({} qubits)", args.qubits));
    print_block(&non_clifford.draw());

    let session = SimulatorSession::with_options(&SimulatorOptions {
        method: args.method,
        seed: args.seed,
        max_qubits: Some(args.qubits),
    })?;

    print_section("Simulation");
    let (stabilizer_counts, stabilizer_secs) = simulate(&session, &clifford, args.shots)?;
    print_result("Clifford time", format!("{stabilizer_secs:.6} s"));
    let (nonstabilizer_counts, nonstabilizer_secs) = simulate(&session, &non_clifford, args.shots)?;
    print_result("Non-Clifford time", format!("{nonstabilizer_secs:.6} s"));

    print_section("Counts");
    print_result("Clifford", &stabilizer_counts);
    print_result("Non-Clifford", &nonstabilizer_counts);

    let record = SweepRecord {
        num_qubits: args.qubits,
        stabilizer_secs,
        nonstabilizer_secs,
        stabilizer_counts,
        nonstabilizer_counts,
    };

    print_section("Measurement results");
    print_block(&render_histograms(std::slice::from_ref(&record)));
    print_block(&render_timing_summary(&record));

    println!();
    print_success("Comparison complete");
    Ok(())
}

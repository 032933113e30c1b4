//! Clifford vs non-Clifford timing sweep.
//!
//! Times both circuits for every qubit count in the range, prints the
//! timing curve, then re-simulates the largest size for a closer look.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::Parser;

use qsweep_adapter_sim::SimulationMethod;
use qsweep_demos::runners::sweep::{build_nonstabilizer_circuit, build_stabilizer_circuit};
use qsweep_demos::runners::{
    SimulatorSession, SweepConfig, SweepRecord, SweepReport, render_histograms,
    render_timing_chart, render_timing_summary, render_timing_table, run_sweep, simulate,
};
use qsweep_demos::{
    create_progress_bar, init_tracing, print_block, print_header, print_info, print_result,
    print_section, print_success,
};

#[derive(Parser, Debug)]
#[command(name = "demo-sweep")]
#[command(about = "Time stabilizer and non-stabilizer simulation over a range of qubit counts")]
struct Args {
    /// YAML sweep configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Smallest qubit count
    #[arg(long)]
    min_qubits: Option<u32>,

    /// Largest qubit count (statevector memory is 16·2ⁿ bytes)
    #[arg(long)]
    max_qubits: Option<u32>,

    /// Shots per simulation
    #[arg(short, long)]
    shots: Option<u32>,

    /// Simulation method (automatic, statevector, stabilizer)
    #[arg(long)]
    method: Option<SimulationMethod>,

    /// Seed for the simulator RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn sweep_config(&self) -> anyhow::Result<SweepConfig> {
        let mut config = match &self.config {
            Some(path) => SweepConfig::from_file(path)?,
            None => SweepConfig::default(),
        };
        if let Some(n) = self.min_qubits {
            config.min_qubits = n;
        }
        if let Some(n) = self.max_qubits {
            config.max_qubits = n;
        }
        if let Some(shots) = self.shots {
            config.shots = shots;
        }
        if let Some(method) = self.method {
            config.simulator.method = method;
        }
        if self.seed.is_some() {
            config.simulator.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let config = args.sweep_config()?;

    print_header("Clifford vs Non-Clifford Time Complexity");
    print_result(
        "Qubits",
        format!("{}..={}", config.min_qubits, config.max_qubits),
    );
    print_result("Shots", config.shots);
    print_result("Method", config.simulator.method);

    let session = SimulatorSession::with_options(&config.simulator_options())?;

    print_section("Sweep");
    let range = config.qubit_range();
    let pb = create_progress_bar(range.clone().count() as u64, "simulating");
    let mut records = Vec::new();
    for record in run_sweep(&session, range, config.shots) {
        let record = record?;
        pb.println(format!(
            "  Qubits={}: Clifford {:.4}s, Non-Clifford {:.4}s",
            record.num_qubits, record.stabilizer_secs, record.nonstabilizer_secs
        ));
        pb.inc(1);
        records.push(record);
    }
    pb.finish_and_clear();
    let report = SweepReport { records };

    print_section("Timing");
    print_block(&render_timing_table(&report.records));
    print_block(&render_timing_chart(&report.records));
    if let Some(slowdown) = report.final_slowdown() {
        print_info(&format!(
            "Non-Clifford is {slowdown:.1}x slower at {} qubits",
            config.max_qubits
        ));
    }

    // Closer look at the largest size.
    let n = config.max_qubits;
    let clifford = build_stabilizer_circuit(n)?;
    let non_clifford = build_nonstabilizer_circuit(n)?;
    print_section(&format!("Clifford circuit ({n} qubits)"));
    print_block(&clifford.draw());
    print_section(&format!("Non-Clifford circuit ({n} qubits)"));
    print_block(&non_clifford.draw());

    let (stabilizer_counts, _) = simulate(&session, &clifford, config.shots)?;
    let (nonstabilizer_counts, _) = simulate(&session, &non_clifford, config.shots)?;
    let (stabilizer_secs, nonstabilizer_secs) = report
        .last()
        .map_or((0.0, 0.0), |r| (r.stabilizer_secs, r.nonstabilizer_secs));
    let largest = SweepRecord {
        num_qubits: n,
        stabilizer_secs,
        nonstabilizer_secs,
        stabilizer_counts,
        nonstabilizer_counts,
    };

    print_section("Measurement results");
    print_block(&render_histograms(std::slice::from_ref(&largest)));
    print_block(&render_timing_summary(&largest));

    println!();
    print_success("Sweep complete");
    Ok(())
}

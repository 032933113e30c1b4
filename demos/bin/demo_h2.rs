//! H₂ ground-state energy with a UCCSD-type ansatz.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;

use qsweep_demos::circuits::{NUM_UCCSD_PARAMS, uccsd_ansatz};
use qsweep_demos::optimizers::{Optimizer, Slsqp};
use qsweep_demos::problems::h2_sto3g;
use qsweep_demos::runners::VqeRunner;
use qsweep_demos::{init_tracing, print_header, print_result, print_section, print_success};

#[derive(Parser, Debug)]
#[command(name = "demo-h2")]
#[command(about = "VQE ground state of H2 (STO-3G, 0.735 Å)")]
struct Args {
    /// Maximum optimizer iterations
    #[arg(long, default_value_t = 100)]
    maxiter: usize,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    print_header("H₂ Ground State");

    let problem = h2_sto3g()?;
    let optimizer = Slsqp::new().with_maxiter(args.maxiter);

    print_section("Problem");
    print_result("Molecule", format!("H₂, {} basis", problem.molecule.basis));
    print_result("Mapping", "parity, two-qubit reduction");
    print_result("Qubits", problem.hamiltonian.num_qubits());
    print_result("Pauli terms", problem.hamiltonian.n_terms());
    print_result("Optimizer", optimizer.name());

    let runner = VqeRunner::new(
        problem.hamiltonian.clone(),
        uccsd_ansatz,
        optimizer,
        vec![0.0; NUM_UCCSD_PARAMS],
    );
    let result = runner.run()?;
    let exact = problem.hamiltonian.ground_energy()?;

    print_section("Result");
    print_result("Electronic energy", format!("{:.8} Ha", result.energy));
    print_result(
        "Nuclear repulsion",
        format!("{:.8} Ha", problem.nuclear_repulsion),
    );
    print_result(
        "Total energy",
        format!("{:.8} Ha", problem.total_energy(result.energy)),
    );
    print_result(
        "Exact total",
        format!("{:.8} Ha", problem.total_energy(exact)),
    );
    print_result("Iterations", result.iterations);
    print_result("Evaluations", result.evaluations);

    if result.converged {
        print_success("Optimizer converged");
    }
    Ok(())
}

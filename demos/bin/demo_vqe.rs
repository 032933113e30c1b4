//! Variational ground state of `H = Z⊗Z + X₁` on two qubits.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;

use qsweep_demos::circuits::toy_ansatz;
use qsweep_demos::optimizers::{Cobyla, Optimizer};
use qsweep_demos::problems::toy_hamiltonian;
use qsweep_demos::runners::VqeRunner;
use qsweep_demos::{init_tracing, print_header, print_result, print_section, print_success};

#[derive(Parser, Debug)]
#[command(name = "demo-vqe")]
#[command(about = "Toy VQE with an Ry-CX ansatz and COBYLA")]
struct Args {
    /// Maximum optimizer iterations
    #[arg(long, default_value_t = 1000)]
    maxiter: usize,

    /// Initial parameters
    #[arg(long, num_args = 2, default_values_t = [0.1, 0.1])]
    initial: Vec<f64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    print_header("Toy VQE");

    let hamiltonian = toy_hamiltonian()?;
    let exact = hamiltonian.ground_energy()?;
    let optimizer = Cobyla::new().with_maxiter(args.maxiter);

    print_section("Problem");
    print_result("Hamiltonian", "1.0·ZZ + 1.0·XI");
    print_result("Ansatz", "ry(θ0, 0) ry(θ1, 1) cx(0, 1)");
    print_result("Optimizer", optimizer.name());
    print_result("Initial point", format!("{:?}", args.initial));

    let runner = VqeRunner::new(hamiltonian, toy_ansatz, optimizer, args.initial);
    let result = runner.run()?;

    print_section("Result");
    print_result(
        "Optimal parameters",
        format!("{:.6?}", result.optimal_params),
    );
    print_result("Energy", format!("{:.8}", result.energy));
    print_result("Exact", format!("{exact:.8}"));
    print_result("Error", format!("{:.2e}", (result.energy - exact).abs()));
    print_result("Evaluations", result.evaluations);

    if result.converged {
        print_success("Optimizer converged");
    }
    Ok(())
}

//! H₂ ground and excited states with an energy-level diagram.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;

use qsweep_demos::problems::h2_sto3g;
use qsweep_demos::render::level_diagram;
use qsweep_demos::runners::ExcitedStatesSolver;
use qsweep_demos::{init_tracing, print_block, print_header, print_result, print_section};

#[derive(Parser, Debug)]
#[command(name = "demo-h2-excited")]
#[command(about = "Ground and excited states of H2 (STO-3G, 0.735 Å)")]
struct Args {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    print_header("H₂ Excited States");

    let solver = ExcitedStatesSolver::new(h2_sto3g()?);
    let result = solver.solve()?;

    print_section("Ground state (VQE)");
    let ground = result.ground();
    print_result("Total energy", format!("{:.8} Ha", ground.total_energy));
    print_result(
        "Exact",
        format!(
            "{:.8} Ha",
            solver.problem().total_energy(result.exact_ground_energy)
        ),
    );

    print_section("Excited states");
    for level in result.excited() {
        print_result(
            &format!("E{}", level.index),
            format!(
                "{:.8} Ha   ΔE = {:.6} Ha",
                level.total_energy, level.excitation_energy
            ),
        );
    }

    print_section("Energy levels");
    let levels: Vec<(String, f64)> = result
        .levels
        .iter()
        .map(|l| (format!("E{}", l.index), l.total_energy))
        .collect();
    print_block(&level_diagram(&levels, "Ha"));
    Ok(())
}

//! RHF molecular-orbital energies of H₂.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;

use qsweep_demos::problems::{Molecule, h2_sto3g};
use qsweep_demos::render::level_diagram;
use qsweep_demos::{init_tracing, print_block, print_header, print_result, print_section};

#[derive(Parser, Debug)]
#[command(name = "demo-orbitals")]
#[command(about = "Molecular-orbital energy levels of H2 (STO-3G, 0.735 Å)")]
struct Args {
    /// Also print the water structure (G2 geometry) as XYZ
    #[arg(long)]
    water: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    print_header("H₂ Molecular Orbitals");

    let problem = h2_sto3g()?;
    let occupied = problem.num_occupied();

    print_section("Geometry (Å)");
    print_block(&problem.molecule.to_xyz());
    if args.water {
        print_block(&Molecule::water().to_xyz());
    }

    print_section("Orbital energies");
    for (i, energy) in problem.orbital_energies.iter().enumerate() {
        let kind = if i < occupied { "occupied" } else { "virtual" };
        print_result(&format!("MO {i} ({kind})"), format!("{energy:.6} Ha"));
    }
    let homo = occupied.checked_sub(1);
    if let Some((homo_energy, lumo_energy)) = homo.and_then(|h| {
        Some((
            *problem.orbital_energies.get(h)?,
            *problem.orbital_energies.get(h + 1)?,
        ))
    }) {
        print_result("HOMO-LUMO gap", format!("{:.6} Ha", lumo_energy - homo_energy));
    }

    print_section("Level diagram");
    let levels: Vec<(String, f64)> = problem
        .orbital_energies
        .iter()
        .enumerate()
        .map(|(i, &e)| {
            let label = match homo {
                Some(h) if i == h => format!("MO {i} HOMO"),
                Some(h) if i == h + 1 => format!("MO {i} LUMO"),
                _ => format!("MO {i}"),
            };
            (label, e)
        })
        .collect();
    print_block(&level_diagram(&levels, "Ha"));
    Ok(())
}

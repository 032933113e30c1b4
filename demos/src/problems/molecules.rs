//! Tabulated molecular problems.
//!
//! There is no integral engine here. Each supported molecule carries a
//! pre-computed qubit Hamiltonian along with the scalars the demos print.
//! The H₂ data is for STO-3G at 0.735 Å under the parity mapping with
//! two-qubit reduction, in Hartree.

use qsweep_sim::Hamiltonian;
use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};

/// Equilibrium bond length of the tabulated H₂ problem, in Ångström.
pub const H2_BOND_LENGTH: f64 = 0.735;

/// Bond lengths closer than this count as the tabulated geometry.
const GEOMETRY_TOLERANCE: f64 = 1e-6;

/// Reduced H₂ Hamiltonian, qubit 0 rightmost.
const H2_PARITY_TERMS: [(&str, f64); 5] = [
    ("II", -1.052373245772859),
    ("IZ", 0.39793742484318045),
    ("ZI", -0.39793742484318045),
    ("ZZ", -0.01128010425623538),
    ("XX", 0.18093119978423156),
];

const H2_NUCLEAR_REPULSION: f64 = 0.7199689944489797;

/// RHF orbital energies (σg, σu*).
const H2_ORBITAL_ENERGIES: [f64; 2] = [-0.580_628_918_7, 0.676_336_228_9];

/// Atom with a Cartesian position in Ångström.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub symbol: String,
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(symbol: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            symbol: symbol.into(),
            position,
        }
    }

    fn distance(&self, other: &Atom) -> f64 {
        self.position
            .iter()
            .zip(&other.position)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

/// Molecular specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub basis: String,
    pub charge: i32,
    /// 2S, the number of unpaired electrons.
    pub spin: u32,
}

impl Molecule {
    /// Neutral singlet H₂ along the z axis.
    pub fn h2(bond_length: f64) -> Self {
        Self {
            atoms: vec![
                Atom::new("H", [0.0, 0.0, 0.0]),
                Atom::new("H", [0.0, 0.0, bond_length]),
            ],
            basis: "sto3g".into(),
            charge: 0,
            spin: 0,
        }
    }

    /// Water at the G2 reference geometry, in the molecular plane x = 0.
    pub fn water() -> Self {
        Self {
            atoms: vec![
                Atom::new("O", [0.0, 0.0, 0.119_262]),
                Atom::new("H", [0.0, 0.763_239, -0.477_047]),
                Atom::new("H", [0.0, -0.763_239, -0.477_047]),
            ],
            basis: "sto3g".into(),
            charge: 0,
            spin: 0,
        }
    }

    /// Element symbols in atom order, e.g. `OHH`.
    pub fn formula(&self) -> String {
        self.atoms.iter().map(|a| a.symbol.as_str()).collect()
    }

    /// XYZ text: atom count, a comment line, then one `symbol x y z` row per atom.
    pub fn to_xyz(&self) -> String {
        let mut out = format!("{}\n{} ({})\n", self.atoms.len(), self.formula(), self.basis);
        for atom in &self.atoms {
            let [x, y, z] = atom.position;
            out.push_str(&format!("{:<2} {x:>10.6} {y:>10.6} {z:>10.6}\n", atom.symbol));
        }
        out
    }

    /// Look up the electronic-structure problem for this molecule.
    pub fn problem(&self) -> DemoResult<ElectronicStructureProblem> {
        if self.is_tabulated_h2() {
            h2_sto3g()
        } else {
            Err(DemoError::UnsupportedMolecule(self.describe()))
        }
    }

    fn is_tabulated_h2(&self) -> bool {
        let [a, b] = self.atoms.as_slice() else {
            return false;
        };
        a.symbol == "H"
            && b.symbol == "H"
            && self.basis.replace('-', "").eq_ignore_ascii_case("sto3g")
            && self.charge == 0
            && self.spin == 0
            && (a.distance(b) - H2_BOND_LENGTH).abs() < GEOMETRY_TOLERANCE
    }

    fn describe(&self) -> String {
        let formula = self.formula();
        match self.atoms.as_slice() {
            [a, b] => format!(
                "{formula} at {:.3} Å in {} (charge {}, spin {})",
                a.distance(b),
                self.basis,
                self.charge,
                self.spin
            ),
            _ => format!("{formula} in {}", self.basis),
        }
    }
}

/// Qubit Hamiltonian plus the classical quantities that go with it.
#[derive(Debug, Clone)]
pub struct ElectronicStructureProblem {
    pub molecule: Molecule,
    /// Electronic part only; add `nuclear_repulsion` for total energies.
    pub hamiltonian: Hamiltonian,
    pub nuclear_repulsion: f64,
    /// RHF orbital energies in ascending order.
    pub orbital_energies: Vec<f64>,
    /// (alpha, beta) electrons.
    pub num_particles: (u32, u32),
    pub num_spatial_orbitals: u32,
}

impl ElectronicStructureProblem {
    /// Number of doubly occupied orbitals in the RHF reference.
    pub fn num_occupied(&self) -> usize {
        self.num_particles.0.min(self.num_particles.1) as usize
    }

    pub fn total_energy(&self, electronic: f64) -> f64 {
        electronic + self.nuclear_repulsion
    }
}

/// H₂ / STO-3G at 0.735 Å.
pub fn h2_sto3g() -> DemoResult<ElectronicStructureProblem> {
    Ok(ElectronicStructureProblem {
        molecule: Molecule::h2(H2_BOND_LENGTH),
        hamiltonian: Hamiltonian::from_labels(H2_PARITY_TERMS)?,
        nuclear_repulsion: H2_NUCLEAR_REPULSION,
        orbital_energies: H2_ORBITAL_ENERGIES.to_vec(),
        num_particles: (1, 1),
        num_spatial_orbitals: 2,
    })
}

/// `H = ZZ + XI` (X on qubit 1).
pub fn toy_hamiltonian() -> DemoResult<Hamiltonian> {
    Ok(Hamiltonian::from_labels([("ZZ", 1.0), ("XI", 1.0)])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h2_lookup() {
        let problem = Molecule::h2(0.735).problem().unwrap();
        assert_eq!(problem.hamiltonian.n_terms(), 5);
        assert_eq!(problem.hamiltonian.num_qubits(), 2);
        assert_eq!(problem.num_occupied(), 1);
    }

    #[test]
    fn test_other_geometry_unsupported() {
        let err = Molecule::h2(1.0).problem().unwrap_err();
        assert!(matches!(err, DemoError::UnsupportedMolecule(ref m) if m.contains("1.000")));

        let mut lih = Molecule::h2(0.735);
        lih.atoms[0].symbol = "Li".into();
        assert!(matches!(lih.problem(), Err(DemoError::UnsupportedMolecule(_))));

        let mut cation = Molecule::h2(0.735);
        cation.charge = 1;
        assert!(cation.problem().is_err());
    }

    #[test]
    fn test_water_geometry() {
        let water = Molecule::water();
        assert_eq!(water.formula(), "OHH");
        let oh = water.atoms[0].distance(&water.atoms[1]);
        assert!((oh - 0.9686).abs() < 1e-3);
        assert!(matches!(
            water.problem(),
            Err(DemoError::UnsupportedMolecule(ref m)) if m.starts_with("OHH")
        ));
    }

    #[test]
    fn test_xyz_rows() {
        let xyz = Molecule::h2(0.735).to_xyz();
        let lines: Vec<&str> = xyz.lines().collect();
        assert_eq!(lines[0], "2");
        assert_eq!(lines[1], "HH (sto3g)");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("H "));
        assert!(lines[3].ends_with("0.735000"));
    }

    #[test]
    fn test_exact_ground_energy() {
        let problem = h2_sto3g().unwrap();
        let electronic = problem.hamiltonian.ground_energy().unwrap();
        assert!((electronic - (-1.857_275_030_202_38)).abs() < 1e-9);
        assert!((problem.total_energy(electronic) - (-1.137_306_035_753_4)).abs() < 1e-9);
    }

    #[test]
    fn test_orbital_energies_ordered() {
        let problem = h2_sto3g().unwrap();
        assert!(problem.orbital_energies.windows(2).all(|w| w[0] < w[1]));
        assert!(problem.orbital_energies[0] < 0.0);
    }
}

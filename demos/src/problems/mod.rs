//! Problem definitions for the variational demos.

pub mod molecules;

pub use molecules::{Atom, ElectronicStructureProblem, Molecule, h2_sto3g, toy_hamiltonian};

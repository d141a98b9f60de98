//! # Topology Module
//!
//! Geometric bond perception for molecules and pairs of molecules.
//!
//! Bonds are inferred purely from interatomic distances: two atoms are bonded when
//! they are closer than the sum of their covalent radii scaled by the molecule's bond
//! factor. No bond orders or valence rules are considered.
//!
//! ## Key Components
//!
//! - [`bonds`] - The [`bonds::Bond`] record and the detectors working within one
//!   molecule and between two molecules
//!
//! ## Usage
//!
//! ```ignore
//! use fragmentino::core::topology::bonds::bonds_within;
//!
//! for bond in bonds_within(&molecule) {
//!     println!("{} - {}: {:.3} A", bond.atom1, bond.atom2, bond.distance);
//! }
//! ```

pub mod bonds;

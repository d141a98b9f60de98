//! # Core Module
//!
//! Stateless building blocks for fragmentation.
//!
//! - **Molecular Representation** ([`models`]) - Periodic table and the `Molecule` atom set
//! - **Bond Detection** ([`topology`]) - Geometric covalent-bond perception
//! - **File I/O** ([`io`]) - XYZ coordinate files and the CSV fragment summary
//! - **Geometry** ([`utils`]) - Distances, centroids and capping positions

pub mod io;
pub mod models;
pub mod topology;
pub mod utils;

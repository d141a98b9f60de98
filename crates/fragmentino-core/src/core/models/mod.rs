//! # Core Models Module
//!
//! - [`element`] - Static periodic table with atomic weights and covalent radii
//! - [`molecule`] - Ordered atoms with Cartesian coordinates and a bond factor
//!
//! ```
//! use fragmentino::core::models::molecule::Molecule;
//! use nalgebra::Point3;
//!
//! let water = Molecule::new(
//!     &[1, 1, 8],
//!     vec![
//!         Point3::new(0.86681, 0.60100, 0.0),
//!         Point3::new(-0.86681, 0.60144, 0.0),
//!         Point3::new(0.0, -0.07579, 0.0),
//!     ],
//! )?;
//! assert_eq!(water.symbols(), vec!["H", "H", "O"]);
//! # Ok::<(), fragmentino::core::models::molecule::MoleculeError>(())
//! ```

pub mod element;
pub mod molecule;

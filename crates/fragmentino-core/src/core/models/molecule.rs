use super::element::{Element, ElementError};
use crate::core::utils::geometry;
use nalgebra::Point3;
use std::fmt;
use thiserror::Error;

/// Default multiplier applied to the sum of covalent radii when deciding whether two
/// atoms are bonded (J. Chem. Phys. 117, 9160 (2002)).
pub const DEFAULT_BOND_FACTOR: f64 = 1.3;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MoleculeError {
    #[error("Atom count mismatch: {atomic_numbers} atomic numbers but {positions} positions")]
    LengthMismatch {
        atomic_numbers: usize,
        positions: usize,
    },
    #[error("Bond factor must be positive and finite (got {0})")]
    InvalidBondFactor(f64),
    #[error(transparent)]
    Element(#[from] ElementError),
}

/// An ordered set of atoms with Cartesian coordinates in Angstrom.
///
/// Atoms are stored as parallel sequences of elements and positions, which always have
/// the same length. The bond factor travels with the molecule so that bond detection on
/// fragments uses the same threshold as on the parent structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    elements: Vec<&'static Element>,
    positions: Vec<Point3<f64>>,
    bond_factor: f64,
}

impl Molecule {
    /// Creates a molecule from atomic numbers and positions using the default bond factor.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::LengthMismatch`] if the two sequences differ in length,
    /// or [`MoleculeError::Element`] if an atomic number is not in the periodic table.
    pub fn new(atomic_numbers: &[u8], positions: Vec<Point3<f64>>) -> Result<Self, MoleculeError> {
        Self::with_bond_factor(atomic_numbers, positions, DEFAULT_BOND_FACTOR)
    }

    /// Creates a molecule with an explicit bond factor.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`Molecule::new`], returns
    /// [`MoleculeError::InvalidBondFactor`] if `bond_factor` is not a positive finite number.
    pub fn with_bond_factor(
        atomic_numbers: &[u8],
        positions: Vec<Point3<f64>>,
        bond_factor: f64,
    ) -> Result<Self, MoleculeError> {
        let elements = atomic_numbers
            .iter()
            .map(|&z| Element::from_atomic_number(z))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_elements(elements, positions, bond_factor)
    }

    /// Creates a molecule from already resolved elements.
    pub fn from_elements(
        elements: Vec<&'static Element>,
        positions: Vec<Point3<f64>>,
        bond_factor: f64,
    ) -> Result<Self, MoleculeError> {
        if elements.len() != positions.len() {
            return Err(MoleculeError::LengthMismatch {
                atomic_numbers: elements.len(),
                positions: positions.len(),
            });
        }
        Ok(Self {
            elements,
            positions,
            bond_factor: validate_bond_factor(bond_factor)?,
        })
    }

    /// Creates a one-atom molecule. Used to seed one fragment per atom; `bond_factor` must
    /// come from an already validated molecule.
    pub(crate) fn single_atom(element: &'static Element, position: Point3<f64>, bond_factor: f64) -> Self {
        Self {
            elements: vec![element],
            positions: vec![position],
            bond_factor,
        }
    }

    /// Creates a new molecule holding the atoms of `first` followed by those of `second`.
    /// The bond factor is taken from `first`.
    pub fn from_molecules(first: &Molecule, second: &Molecule) -> Self {
        let mut combined = first.clone();
        combined.extend(second.clone());
        combined
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn bond_factor(&self) -> f64 {
        self.bond_factor
    }

    /// Replaces the bond factor used for bond detection on this molecule.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::InvalidBondFactor`] if `bond_factor` is not a positive
    /// finite number; the molecule is left unchanged.
    pub fn set_bond_factor(&mut self, bond_factor: f64) -> Result<(), MoleculeError> {
        self.bond_factor = validate_bond_factor(bond_factor)?;
        Ok(())
    }

    pub fn elements(&self) -> &[&'static Element] {
        &self.elements
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn atomic_numbers(&self) -> Vec<u8> {
        self.elements.iter().map(|e| e.atomic_number).collect()
    }

    pub fn symbols(&self) -> Vec<&'static str> {
        self.elements.iter().map(|e| e.symbol).collect()
    }

    /// Returns the atom at `index` as a one-atom molecule, or `None` if out of range.
    pub fn atom(&self, index: usize) -> Option<Molecule> {
        let element = self.elements.get(index)?;
        let position = self.positions.get(index)?;
        Some(Self::single_atom(element, *position, self.bond_factor))
    }

    /// Iterates over `(element, position)` pairs in atom order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static Element, &Point3<f64>)> + '_ {
        self.elements.iter().copied().zip(self.positions.iter())
    }

    /// Appends a single atom. Used by bond capping.
    pub fn add_atom(&mut self, element: &'static Element, position: Point3<f64>) {
        self.elements.push(element);
        self.positions.push(position);
    }

    /// Appends all atoms of `other`, consuming it.
    pub fn extend(&mut self, other: Molecule) {
        self.elements.extend(other.elements);
        self.positions.extend(other.positions);
    }

    /// Full matrix of interatomic distances.
    pub fn distances(&self) -> Vec<Vec<f64>> {
        geometry::distance_matrix(&self.positions, &self.positions)
    }

    /// Mass-weighted centroid of the atoms, or `None` for an empty molecule.
    pub fn center_of_mass(&self) -> Option<Point3<f64>> {
        let weights: Vec<f64> = self.elements.iter().map(|e| e.atomic_weight).collect();
        geometry::weighted_centroid(&self.positions, &weights)
    }

    pub fn same_size(&self, other: &Molecule) -> bool {
        self.len() == other.len()
    }
}

fn validate_bond_factor(bond_factor: f64) -> Result<f64, MoleculeError> {
    if bond_factor.is_finite() && bond_factor > 0.0 {
        Ok(bond_factor)
    } else {
        Err(MoleculeError::InvalidBondFactor(bond_factor))
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Molecule {}", self.len())
    }
}

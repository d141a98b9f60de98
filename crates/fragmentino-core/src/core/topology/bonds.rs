use crate::core::models::element::{self, Element};
use crate::core::models::molecule::Molecule;
use itertools::Itertools;

/// A covalent bond detected from geometry.
///
/// `atom1` and `atom2` are atom indices. For bonds within one molecule `atom1 < atom2`;
/// for bonds between two molecules `atom1` indexes the first molecule and `atom2` the
/// second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub distance: f64, // Interatomic distance in Angstrom
}

/// Distance below which two atoms of the given elements count as bonded.
pub fn bond_threshold(a: &Element, b: &Element, bond_factor: f64) -> f64 {
    element::bond_length(a, b, bond_factor)
}

/// Whether two atoms at `distance` are bonded under the covalent-radius rule.
#[inline]
pub fn is_bonded(distance: f64, a: &Element, b: &Element, bond_factor: f64) -> bool {
    distance < bond_threshold(a, b, bond_factor)
}

/// Bonds between atoms of a single molecule, each unordered pair reported once with
/// `atom1 < atom2`, in row-major order.
pub fn bonds_within(molecule: &Molecule) -> Vec<Bond> {
    let elements = molecule.elements();
    let positions = molecule.positions();
    let factor = molecule.bond_factor();

    (0..molecule.len())
        .tuple_combinations()
        .filter_map(|(i, j)| {
            let distance = nalgebra::distance(&positions[i], &positions[j]);
            is_bonded(distance, elements[i], elements[j], factor).then_some(Bond {
                atom1: i,
                atom2: j,
                distance,
            })
        })
        .collect()
}

/// Bonds from atoms of `first` to atoms of `second`, using the bond factor of `first`.
///
/// The two index spaces are disjoint, so every qualifying pair is reported.
pub fn bonds_between(first: &Molecule, second: &Molecule) -> Vec<Bond> {
    let factor = first.bond_factor();

    first
        .iter()
        .enumerate()
        .cartesian_product(second.iter().enumerate().collect::<Vec<_>>())
        .filter_map(|((i, (e1, p1)), (j, (e2, p2)))| {
            let distance = nalgebra::distance(p1, p2);
            is_bonded(distance, e1, e2, factor).then_some(Bond {
                atom1: i,
                atom2: j,
                distance,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn water() -> Molecule {
        Molecule::new(
            &[1, 1, 8],
            vec![
                Point3::new(0.86681, 0.60100, 0.0),
                Point3::new(-0.86681, 0.60144, 0.0),
                Point3::new(0.0, -0.07579, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn bonds_within_finds_oh_bonds_but_not_hh() {
        let bonds = bonds_within(&water());
        assert_eq!(bonds.len(), 2);
        assert_eq!((bonds[0].atom1, bonds[0].atom2), (0, 2));
        assert_eq!((bonds[1].atom1, bonds[1].atom2), (1, 2));
        assert!((bonds[0].distance - 1.09972921).abs() < 1e-6);
        assert!((bonds[1].distance - 1.10000005).abs() < 1e-6);
    }

    #[test]
    fn bonds_within_respects_bond_factor() {
        let positions = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let tight = Molecule::with_bond_factor(&[1, 1], positions.clone(), 1.0).unwrap();
        let loose = Molecule::with_bond_factor(&[1, 1], positions, 2.0).unwrap();
        assert!(bonds_within(&tight).is_empty());
        assert_eq!(bonds_within(&loose).len(), 1);
    }

    #[test]
    fn threshold_is_strict() {
        let h = Element::hydrogen();
        let threshold = bond_threshold(h, h, 1.0);
        assert!(!is_bonded(threshold, h, h, 1.0));
        assert!(is_bonded(threshold - 1e-9, h, h, 1.0));
    }

    #[test]
    fn bonds_within_single_atom_is_empty() {
        let m = Molecule::new(&[6], vec![Point3::origin()]).unwrap();
        assert!(bonds_within(&m).is_empty());
    }

    #[test]
    fn bonds_between_reports_indices_in_each_molecule() {
        let m = water();
        let hydrogen = m.atom(1).unwrap();
        let rest = Molecule::from_molecules(&m.atom(0).unwrap(), &m.atom(2).unwrap());

        let bonds = bonds_between(&hydrogen, &rest);

        assert_eq!(bonds.len(), 1);
        assert_eq!((bonds[0].atom1, bonds[0].atom2), (0, 1));
        assert!((bonds[0].distance - 1.10000005).abs() < 1e-6);
    }

    #[test]
    fn bonds_between_distant_molecules_is_empty() {
        let a = Molecule::new(&[6], vec![Point3::origin()]).unwrap();
        let b = Molecule::new(&[6], vec![Point3::new(10.0, 0.0, 0.0)]).unwrap();
        assert!(bonds_between(&a, &b).is_empty());
    }
}

use phf::phf_map;
use std::fmt;
use thiserror::Error;

/// Atomic number of hydrogen, the element used to cap severed bonds.
pub const HYDROGEN: u8 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElementError {
    #[error("Unknown atomic number: {0} (supported range is 1-{max})", max = ELEMENTS.len())]
    UnknownAtomicNumber(u8),
    #[error("Unknown element symbol: '{0}'")]
    UnknownSymbol(String),
}

/// A chemical element with the reference data needed for bond detection and
/// mass-weighted geometry.
///
/// Covalent radii follow Cordero et al., Dalton Trans. (2008) 2832, except for carbon,
/// which uses the sp2 radius of 0.73 Å. Atomic weights are NIST standard atomic weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Position in the periodic table (1 for hydrogen).
    pub atomic_number: u8,
    /// Chemical symbol with canonical capitalisation (e.g. "Cl").
    pub symbol: &'static str,
    /// Standard atomic weight in g/mol.
    pub atomic_weight: f64,
    /// Single-bond covalent radius in Angstrom.
    pub covalent_radius: f64,
}

// Indexed by atomic number - 1.
static ELEMENTS: [Element; 96] = [
    Element { atomic_number: 1, symbol: "H", atomic_weight: 1.008, covalent_radius: 0.31 },
    Element { atomic_number: 2, symbol: "He", atomic_weight: 4.003, covalent_radius: 0.28 },
    Element { atomic_number: 3, symbol: "Li", atomic_weight: 6.968, covalent_radius: 1.28 },
    Element { atomic_number: 4, symbol: "Be", atomic_weight: 9.012, covalent_radius: 0.96 },
    Element { atomic_number: 5, symbol: "B", atomic_weight: 10.814, covalent_radius: 0.84 },
    Element { atomic_number: 6, symbol: "C", atomic_weight: 12.011, covalent_radius: 0.73 },
    Element { atomic_number: 7, symbol: "N", atomic_weight: 14.007, covalent_radius: 0.71 },
    Element { atomic_number: 8, symbol: "O", atomic_weight: 15.999, covalent_radius: 0.66 },
    Element { atomic_number: 9, symbol: "F", atomic_weight: 18.998, covalent_radius: 0.57 },
    Element { atomic_number: 10, symbol: "Ne", atomic_weight: 20.1797, covalent_radius: 0.58 },
    Element { atomic_number: 11, symbol: "Na", atomic_weight: 22.99, covalent_radius: 1.66 },
    Element { atomic_number: 12, symbol: "Mg", atomic_weight: 24.3055, covalent_radius: 1.41 },
    Element { atomic_number: 13, symbol: "Al", atomic_weight: 26.982, covalent_radius: 1.21 },
    Element { atomic_number: 14, symbol: "Si", atomic_weight: 28.085, covalent_radius: 1.11 },
    Element { atomic_number: 15, symbol: "P", atomic_weight: 30.974, covalent_radius: 1.07 },
    Element { atomic_number: 16, symbol: "S", atomic_weight: 32.068, covalent_radius: 1.05 },
    Element { atomic_number: 17, symbol: "Cl", atomic_weight: 35.452, covalent_radius: 1.02 },
    Element { atomic_number: 18, symbol: "Ar", atomic_weight: 39.948, covalent_radius: 1.06 },
    Element { atomic_number: 19, symbol: "K", atomic_weight: 39.098, covalent_radius: 2.03 },
    Element { atomic_number: 20, symbol: "Ca", atomic_weight: 40.078, covalent_radius: 1.76 },
    Element { atomic_number: 21, symbol: "Sc", atomic_weight: 44.956, covalent_radius: 1.7 },
    Element { atomic_number: 22, symbol: "Ti", atomic_weight: 47.867, covalent_radius: 1.6 },
    Element { atomic_number: 23, symbol: "V", atomic_weight: 50.942, covalent_radius: 1.53 },
    Element { atomic_number: 24, symbol: "Cr", atomic_weight: 51.996, covalent_radius: 1.39 },
    Element { atomic_number: 25, symbol: "Mn", atomic_weight: 54.938, covalent_radius: 1.39 },
    Element { atomic_number: 26, symbol: "Fe", atomic_weight: 55.845, covalent_radius: 1.32 },
    Element { atomic_number: 27, symbol: "Co", atomic_weight: 58.933, covalent_radius: 1.26 },
    Element { atomic_number: 28, symbol: "Ni", atomic_weight: 58.693, covalent_radius: 1.24 },
    Element { atomic_number: 29, symbol: "Cu", atomic_weight: 63.546, covalent_radius: 1.32 },
    Element { atomic_number: 30, symbol: "Zn", atomic_weight: 65.38, covalent_radius: 1.22 },
    Element { atomic_number: 31, symbol: "Ga", atomic_weight: 69.723, covalent_radius: 1.22 },
    Element { atomic_number: 32, symbol: "Ge", atomic_weight: 72.63, covalent_radius: 1.2 },
    Element { atomic_number: 33, symbol: "As", atomic_weight: 74.922, covalent_radius: 1.19 },
    Element { atomic_number: 34, symbol: "Se", atomic_weight: 78.971, covalent_radius: 1.2 },
    Element { atomic_number: 35, symbol: "Br", atomic_weight: 79.904, covalent_radius: 1.2 },
    Element { atomic_number: 36, symbol: "Kr", atomic_weight: 83.798, covalent_radius: 1.16 },
    Element { atomic_number: 37, symbol: "Rb", atomic_weight: 85.468, covalent_radius: 2.2 },
    Element { atomic_number: 38, symbol: "Sr", atomic_weight: 87.62, covalent_radius: 1.95 },
    Element { atomic_number: 39, symbol: "Y", atomic_weight: 88.906, covalent_radius: 1.9 },
    Element { atomic_number: 40, symbol: "Zr", atomic_weight: 91.224, covalent_radius: 1.75 },
    Element { atomic_number: 41, symbol: "Nb", atomic_weight: 92.906, covalent_radius: 1.64 },
    Element { atomic_number: 42, symbol: "Mo", atomic_weight: 95.95, covalent_radius: 1.54 },
    Element { atomic_number: 43, symbol: "Tc", atomic_weight: 98.0, covalent_radius: 1.47 },
    Element { atomic_number: 44, symbol: "Ru", atomic_weight: 101.07, covalent_radius: 1.46 },
    Element { atomic_number: 45, symbol: "Rh", atomic_weight: 102.906, covalent_radius: 1.42 },
    Element { atomic_number: 46, symbol: "Pd", atomic_weight: 106.42, covalent_radius: 1.39 },
    Element { atomic_number: 47, symbol: "Ag", atomic_weight: 107.868, covalent_radius: 1.45 },
    Element { atomic_number: 48, symbol: "Cd", atomic_weight: 112.414, covalent_radius: 1.44 },
    Element { atomic_number: 49, symbol: "In", atomic_weight: 114.818, covalent_radius: 1.42 },
    Element { atomic_number: 50, symbol: "Sn", atomic_weight: 118.71, covalent_radius: 1.39 },
    Element { atomic_number: 51, symbol: "Sb", atomic_weight: 121.76, covalent_radius: 1.39 },
    Element { atomic_number: 52, symbol: "Te", atomic_weight: 127.6, covalent_radius: 1.38 },
    Element { atomic_number: 53, symbol: "I", atomic_weight: 126.904, covalent_radius: 1.39 },
    Element { atomic_number: 54, symbol: "Xe", atomic_weight: 131.293, covalent_radius: 1.4 },
    Element { atomic_number: 55, symbol: "Cs", atomic_weight: 132.905, covalent_radius: 2.44 },
    Element { atomic_number: 56, symbol: "Ba", atomic_weight: 137.327, covalent_radius: 2.15 },
    Element { atomic_number: 57, symbol: "La", atomic_weight: 138.905, covalent_radius: 2.07 },
    Element { atomic_number: 58, symbol: "Ce", atomic_weight: 140.116, covalent_radius: 2.04 },
    Element { atomic_number: 59, symbol: "Pr", atomic_weight: 140.907, covalent_radius: 2.03 },
    Element { atomic_number: 60, symbol: "Nd", atomic_weight: 144.242, covalent_radius: 2.01 },
    Element { atomic_number: 61, symbol: "Pm", atomic_weight: 145.0, covalent_radius: 1.99 },
    Element { atomic_number: 62, symbol: "Sm", atomic_weight: 150.36, covalent_radius: 1.98 },
    Element { atomic_number: 63, symbol: "Eu", atomic_weight: 151.964, covalent_radius: 1.98 },
    Element { atomic_number: 64, symbol: "Gd", atomic_weight: 157.25, covalent_radius: 1.96 },
    Element { atomic_number: 65, symbol: "Tb", atomic_weight: 158.925, covalent_radius: 1.94 },
    Element { atomic_number: 66, symbol: "Dy", atomic_weight: 162.5, covalent_radius: 1.92 },
    Element { atomic_number: 67, symbol: "Ho", atomic_weight: 164.93, covalent_radius: 1.92 },
    Element { atomic_number: 68, symbol: "Er", atomic_weight: 167.259, covalent_radius: 1.89 },
    Element { atomic_number: 69, symbol: "Tm", atomic_weight: 168.934, covalent_radius: 1.9 },
    Element { atomic_number: 70, symbol: "Yb", atomic_weight: 173.054, covalent_radius: 1.87 },
    Element { atomic_number: 71, symbol: "Lu", atomic_weight: 174.967, covalent_radius: 1.87 },
    Element { atomic_number: 72, symbol: "Hf", atomic_weight: 178.49, covalent_radius: 1.75 },
    Element { atomic_number: 73, symbol: "Ta", atomic_weight: 180.948, covalent_radius: 1.7 },
    Element { atomic_number: 74, symbol: "W", atomic_weight: 183.84, covalent_radius: 1.62 },
    Element { atomic_number: 75, symbol: "Re", atomic_weight: 186.207, covalent_radius: 1.51 },
    Element { atomic_number: 76, symbol: "Os", atomic_weight: 190.23, covalent_radius: 1.44 },
    Element { atomic_number: 77, symbol: "Ir", atomic_weight: 192.217, covalent_radius: 1.41 },
    Element { atomic_number: 78, symbol: "Pt", atomic_weight: 195.084, covalent_radius: 1.36 },
    Element { atomic_number: 79, symbol: "Au", atomic_weight: 196.967, covalent_radius: 1.36 },
    Element { atomic_number: 80, symbol: "Hg", atomic_weight: 200.592, covalent_radius: 1.32 },
    Element { atomic_number: 81, symbol: "Tl", atomic_weight: 204.384, covalent_radius: 1.45 },
    Element { atomic_number: 82, symbol: "Pb", atomic_weight: 207.2, covalent_radius: 1.46 },
    Element { atomic_number: 83, symbol: "Bi", atomic_weight: 208.98, covalent_radius: 1.48 },
    Element { atomic_number: 84, symbol: "Po", atomic_weight: 209.0, covalent_radius: 1.4 },
    Element { atomic_number: 85, symbol: "At", atomic_weight: 210.0, covalent_radius: 1.5 },
    Element { atomic_number: 86, symbol: "Rn", atomic_weight: 222.0, covalent_radius: 1.5 },
    Element { atomic_number: 87, symbol: "Fr", atomic_weight: 223.0, covalent_radius: 2.6 },
    Element { atomic_number: 88, symbol: "Ra", atomic_weight: 226.0, covalent_radius: 2.21 },
    Element { atomic_number: 89, symbol: "Ac", atomic_weight: 227.0, covalent_radius: 2.15 },
    Element { atomic_number: 90, symbol: "Th", atomic_weight: 232.038, covalent_radius: 2.06 },
    Element { atomic_number: 91, symbol: "Pa", atomic_weight: 231.036, covalent_radius: 2.0 },
    Element { atomic_number: 92, symbol: "U", atomic_weight: 238.029, covalent_radius: 1.96 },
    Element { atomic_number: 93, symbol: "Np", atomic_weight: 237.0, covalent_radius: 1.9 },
    Element { atomic_number: 94, symbol: "Pu", atomic_weight: 244.0, covalent_radius: 1.87 },
    Element { atomic_number: 95, symbol: "Am", atomic_weight: 243.0, covalent_radius: 1.8 },
    Element { atomic_number: 96, symbol: "Cm", atomic_weight: 247.0, covalent_radius: 1.69 },
];

static SYMBOL_TO_ATOMIC_NUMBER: phf::Map<&'static str, u8> = phf_map! {
    "H" => 1,
    "He" => 2,
    "Li" => 3,
    "Be" => 4,
    "B" => 5,
    "C" => 6,
    "N" => 7,
    "O" => 8,
    "F" => 9,
    "Ne" => 10,
    "Na" => 11,
    "Mg" => 12,
    "Al" => 13,
    "Si" => 14,
    "P" => 15,
    "S" => 16,
    "Cl" => 17,
    "Ar" => 18,
    "K" => 19,
    "Ca" => 20,
    "Sc" => 21,
    "Ti" => 22,
    "V" => 23,
    "Cr" => 24,
    "Mn" => 25,
    "Fe" => 26,
    "Co" => 27,
    "Ni" => 28,
    "Cu" => 29,
    "Zn" => 30,
    "Ga" => 31,
    "Ge" => 32,
    "As" => 33,
    "Se" => 34,
    "Br" => 35,
    "Kr" => 36,
    "Rb" => 37,
    "Sr" => 38,
    "Y" => 39,
    "Zr" => 40,
    "Nb" => 41,
    "Mo" => 42,
    "Tc" => 43,
    "Ru" => 44,
    "Rh" => 45,
    "Pd" => 46,
    "Ag" => 47,
    "Cd" => 48,
    "In" => 49,
    "Sn" => 50,
    "Sb" => 51,
    "Te" => 52,
    "I" => 53,
    "Xe" => 54,
    "Cs" => 55,
    "Ba" => 56,
    "La" => 57,
    "Ce" => 58,
    "Pr" => 59,
    "Nd" => 60,
    "Pm" => 61,
    "Sm" => 62,
    "Eu" => 63,
    "Gd" => 64,
    "Tb" => 65,
    "Dy" => 66,
    "Ho" => 67,
    "Er" => 68,
    "Tm" => 69,
    "Yb" => 70,
    "Lu" => 71,
    "Hf" => 72,
    "Ta" => 73,
    "W" => 74,
    "Re" => 75,
    "Os" => 76,
    "Ir" => 77,
    "Pt" => 78,
    "Au" => 79,
    "Hg" => 80,
    "Tl" => 81,
    "Pb" => 82,
    "Bi" => 83,
    "Po" => 84,
    "At" => 85,
    "Rn" => 86,
    "Fr" => 87,
    "Ra" => 88,
    "Ac" => 89,
    "Th" => 90,
    "Pa" => 91,
    "U" => 92,
    "Np" => 93,
    "Pu" => 94,
    "Am" => 95,
    "Cm" => 96,
};

impl Element {
    /// Looks up an element by atomic number.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::UnknownAtomicNumber`] if `atomic_number` is zero or lies
    /// beyond the end of the table.
    pub fn from_atomic_number(atomic_number: u8) -> Result<&'static Element, ElementError> {
        atomic_number
            .checked_sub(1)
            .and_then(|idx| ELEMENTS.get(idx as usize))
            .ok_or(ElementError::UnknownAtomicNumber(atomic_number))
    }

    /// Looks up an element by chemical symbol.
    ///
    /// Matching ignores case, so `"CL"`, `"cl"` and `"Cl"` all resolve to chlorine.
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::UnknownSymbol`] if no element carries the symbol.
    pub fn from_symbol(symbol: &str) -> Result<&'static Element, ElementError> {
        let normalized = normalize_symbol(symbol.trim());
        SYMBOL_TO_ATOMIC_NUMBER
            .get(normalized.as_str())
            .and_then(|&z| Self::from_atomic_number(z).ok())
            .ok_or_else(|| ElementError::UnknownSymbol(symbol.trim().to_string()))
    }

    pub fn hydrogen() -> &'static Element {
        &ELEMENTS[(HYDROGEN - 1) as usize]
    }

    pub fn is_hydrogen(&self) -> bool {
        self.atomic_number == HYDROGEN
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Reference length of a bond between two elements: the sum of their covalent radii,
/// multiplied by `scale`.
pub fn bond_length(a: &Element, b: &Element, scale: f64) -> f64 {
    (a.covalent_radius + b.covalent_radius) * scale
}

fn normalize_symbol(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_atomic_number() {
        for (idx, element) in ELEMENTS.iter().enumerate() {
            assert_eq!(element.atomic_number as usize, idx + 1);
        }
    }

    #[test]
    fn symbol_map_agrees_with_table() {
        assert_eq!(SYMBOL_TO_ATOMIC_NUMBER.len(), ELEMENTS.len());
        for element in &ELEMENTS {
            assert_eq!(
                SYMBOL_TO_ATOMIC_NUMBER.get(element.symbol),
                Some(&element.atomic_number)
            );
        }
    }

    #[test]
    fn from_atomic_number_returns_expected_elements() {
        assert_eq!(Element::from_atomic_number(1).unwrap().symbol, "H");
        assert_eq!(Element::from_atomic_number(8).unwrap().symbol, "O");
        assert_eq!(Element::from_atomic_number(29).unwrap().atomic_weight, 63.546);
        assert_eq!(Element::from_atomic_number(96).unwrap().symbol, "Cm");
    }

    #[test]
    fn from_atomic_number_rejects_out_of_range_values() {
        assert_eq!(
            Element::from_atomic_number(0),
            Err(ElementError::UnknownAtomicNumber(0))
        );
        assert_eq!(
            Element::from_atomic_number(97),
            Err(ElementError::UnknownAtomicNumber(97))
        );
    }

    #[test]
    fn from_symbol_is_case_insensitive() {
        assert_eq!(Element::from_symbol("Cl").unwrap().atomic_number, 17);
        assert_eq!(Element::from_symbol("CL").unwrap().atomic_number, 17);
        assert_eq!(Element::from_symbol("cl").unwrap().atomic_number, 17);
        assert_eq!(Element::from_symbol(" o ").unwrap().atomic_number, 8);
    }

    #[test]
    fn from_symbol_rejects_unknown_symbols() {
        assert_eq!(
            Element::from_symbol("Xx"),
            Err(ElementError::UnknownSymbol("Xx".to_string()))
        );
        assert!(Element::from_symbol("").is_err());
    }

    #[test]
    fn bond_length_sums_radii_and_applies_scale() {
        let h = Element::hydrogen();
        let o = Element::from_symbol("O").unwrap();
        assert!((bond_length(h, o, 1.0) - 0.97).abs() < 1e-12);
        assert!((bond_length(h, h, 1.3) - 0.806).abs() < 1e-12);
    }

    #[test]
    fn display_prints_symbol() {
        assert_eq!(Element::hydrogen().to_string(), "H");
        assert!(Element::hydrogen().is_hydrogen());
    }
}

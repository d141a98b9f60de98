use crate::core::io::traits::MolecularFile;
use crate::core::models::element::Element;
use crate::core::models::molecule::{DEFAULT_BOND_FACTOR, Molecule};
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const ZERO_WIDTH_SPACE: char = '\u{200b}';
const DEFAULT_COMMENT: &str = "Generated by fragmentino";

/// Metadata carried by an XYZ file: the free-text comment on line 2.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XyzMetadata {
    pub comment: String,
}

impl XyzMetadata {
    pub fn with_comment(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count (value: '{value}')")]
    InvalidAtomCount { value: String },
    #[error("Atom record needs a symbol and three coordinates, found {found} field(s)")]
    MissingFields { found: usize },
    #[error("Invalid {axis} coordinate (value: '{value}')")]
    InvalidFloat { axis: char, value: String },
    #[error("Unknown element symbol '{symbol}'")]
    UnknownElement { symbol: String },
}

/// Reader and writer for the plain XYZ format.
///
/// Layout: line 1 holds the atom count, line 2 a free-text comment, and each following
/// line one atom as `SYMBOL x y z` with coordinates in Angstrom. Columns beyond the
/// fourth are ignored, as are blank lines after the atom records.
pub struct XyzFile;

impl XyzFile {
    /// Reads a molecule and assigns it `bond_factor` instead of the default.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`MolecularFile::read_from_path`], plus
    /// [`XyzError::Inconsistency`] if the bond factor is invalid.
    pub fn read_with_bond_factor<P: AsRef<std::path::Path>>(
        path: P,
        bond_factor: f64,
    ) -> Result<(Molecule, XyzMetadata), XyzError> {
        let (mut molecule, metadata) = Self::read_from_path(path)?;
        molecule
            .set_bond_factor(bond_factor)
            .map_err(|e| XyzError::Inconsistency(e.to_string()))?;
        Ok((molecule, metadata))
    }
}

fn clean_line(line: &str) -> String {
    line.replace(ZERO_WIDTH_SPACE, "")
}

fn parse_coordinate(value: &str, axis: char, line: usize) -> Result<f64, XyzError> {
    value.parse().map_err(|_| XyzError::Parse {
        line,
        kind: XyzParseErrorKind::InvalidFloat {
            axis,
            value: value.to_string(),
        },
    })
}

impl MolecularFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Molecule, Self::Metadata), Self::Error> {
        let mut lines = reader.lines();

        let count_line = lines
            .next()
            .ok_or_else(|| XyzError::MissingRecord("atom count line".into()))??;
        let count_str = clean_line(&count_line);
        let count_str = count_str.trim();
        let expected: usize = count_str.parse().map_err(|_| XyzError::Parse {
            line: 1,
            kind: XyzParseErrorKind::InvalidAtomCount {
                value: count_str.to_string(),
            },
        })?;

        let comment = match lines.next() {
            Some(line) => clean_line(&line?).trim_end().to_string(),
            None => return Err(XyzError::MissingRecord("comment line".into())),
        };

        // The header is untrusted until checked against the records.
        let mut elements = Vec::new();
        let mut positions = Vec::new();

        for (offset, line_res) in lines.enumerate() {
            let line_num = offset + 3;
            let line = clean_line(&line_res?);
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() < 4 {
                return Err(XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::MissingFields {
                        found: fields.len(),
                    },
                });
            }

            let element = Element::from_symbol(fields[0]).map_err(|_| XyzError::Parse {
                line: line_num,
                kind: XyzParseErrorKind::UnknownElement {
                    symbol: fields[0].to_string(),
                },
            })?;
            let x = parse_coordinate(fields[1], 'x', line_num)?;
            let y = parse_coordinate(fields[2], 'y', line_num)?;
            let z = parse_coordinate(fields[3], 'z', line_num)?;

            elements.push(element);
            positions.push(Point3::new(x, y, z));
        }

        if elements.len() != expected {
            return Err(XyzError::Inconsistency(format!(
                "Header declares {} atoms but {} atom records were found",
                expected,
                elements.len()
            )));
        }

        let molecule = Molecule::from_elements(elements, positions, DEFAULT_BOND_FACTOR)
            .map_err(|e| XyzError::Inconsistency(e.to_string()))?;
        Ok((molecule, XyzMetadata { comment }))
    }

    fn write_to(
        molecule: &Molecule,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", molecule.len())?;
        writeln!(writer, "{}", metadata.comment.replace(['\n', '\r'], " "))?;
        for (element, position) in molecule.iter() {
            writeln!(
                writer,
                "{} {:15.10} {:15.10} {:15.10}",
                element.symbol, position.x, position.y, position.z
            )?;
        }
        Ok(())
    }

    fn write_molecule_to(molecule: &Molecule, writer: &mut impl Write) -> Result<(), Self::Error> {
        Self::write_to(molecule, &XyzMetadata::with_comment(DEFAULT_COMMENT), writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WATER_XYZ: &str = "3\n\
        water molecule\n\
        H    0.86681    0.60100    0.00000\n\
        H   -0.86681    0.60144    0.00000\n\
        O    0.00000   -0.07579    0.00000\n";

    fn read_str(content: &str) -> Result<(Molecule, XyzMetadata), XyzError> {
        XyzFile::read_from(&mut Cursor::new(content.as_bytes()))
    }

    #[test]
    fn read_parses_atoms_and_comment() {
        let (molecule, metadata) = read_str(WATER_XYZ).unwrap();
        assert_eq!(metadata.comment, "water molecule");
        assert_eq!(molecule.atomic_numbers(), vec![1, 1, 8]);
        assert_eq!(molecule.positions()[0], Point3::new(0.86681, 0.60100, 0.0));
        assert_eq!(molecule.positions()[2], Point3::new(0.0, -0.07579, 0.0));
        assert_eq!(molecule.bond_factor(), DEFAULT_BOND_FACTOR);
    }

    #[test]
    fn read_strips_zero_width_spaces_and_trailing_blank_lines() {
        let content = "1\n\nC 0.0 1.0 2.0\u{200b}\n\n\n";
        let (molecule, metadata) = read_str(content).unwrap();
        assert_eq!(metadata.comment, "");
        assert_eq!(molecule.positions()[0], Point3::new(0.0, 1.0, 2.0));
    }

    #[test]
    fn read_normalizes_symbol_case() {
        let (molecule, _) = read_str("2\n\nCL 0 0 0\nna 0 0 3\n").unwrap();
        assert_eq!(molecule.atomic_numbers(), vec![17, 11]);
    }

    #[test]
    fn read_rejects_invalid_atom_count() {
        let err = read_str("three\n\nH 0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidAtomCount { .. }
            }
        ));
    }

    #[test]
    fn read_rejects_missing_comment_line() {
        let err = read_str("0\n").unwrap_err();
        assert!(matches!(err, XyzError::MissingRecord(_)));
    }

    #[test]
    fn read_rejects_short_atom_record() {
        let err = read_str("1\n\nH 0.0 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::MissingFields { found: 3 }
            }
        ));
    }

    #[test]
    fn read_rejects_bad_coordinate() {
        let err = read_str("1\n\nH 0.0 abc 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::InvalidFloat { axis: 'y', .. }
            }
        ));
    }

    #[test]
    fn read_rejects_unknown_element() {
        let err = read_str("1\n\nXq 0.0 0.0 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                kind: XyzParseErrorKind::UnknownElement { .. },
                ..
            }
        ));
    }

    #[test]
    fn read_rejects_count_mismatch() {
        let err = read_str("4\n\nH 0 0 0\nH 0 0 1\n").unwrap_err();
        assert!(matches!(err, XyzError::Inconsistency(_)));
    }

    #[test]
    fn read_rejects_oversized_atom_count_without_allocating() {
        let err = read_str("18446744073709551615\n\nH 0 0 0\n").unwrap_err();
        assert!(matches!(err, XyzError::Inconsistency(_)));
    }

    #[test]
    fn write_uses_fixed_width_coordinates() {
        let molecule = Molecule::new(&[8], vec![Point3::new(1.5, -2.0, 0.0)]).unwrap();
        let mut buffer = Vec::new();
        XyzFile::write_to(&molecule, &XyzMetadata::with_comment("test"), &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "1");
        assert_eq!(lines[1], "test");
        assert_eq!(
            lines[2],
            "O    1.5000000000   -2.0000000000    0.0000000000"
        );
    }

    #[test]
    fn write_flattens_multiline_comments() {
        let molecule = Molecule::new(&[1], vec![Point3::origin()]).unwrap();
        let mut buffer = Vec::new();
        XyzFile::write_to(&molecule, &XyzMetadata::with_comment("a\nb"), &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().nth(1), Some("a b"));
        assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn file_round_trip_preserves_atoms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.xyz");
        let original = Molecule::new(
            &[1, 2, 6],
            vec![
                Point3::new(0.123456789, -1.0, 2.5),
                Point3::origin(),
                Point3::new(-10.25, 3.75, 0.000001),
            ],
        )
        .unwrap();

        XyzFile::write_molecule_to_path(&original, &path).unwrap();
        let (read_back, metadata) = XyzFile::read_from_path(&path).unwrap();

        assert_eq!(metadata.comment, DEFAULT_COMMENT);
        assert_eq!(read_back.atomic_numbers(), original.atomic_numbers());
        for (a, b) in read_back.positions().iter().zip(original.positions()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn read_with_bond_factor_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.xyz");
        std::fs::write(&path, WATER_XYZ).unwrap();

        let (molecule, _) = XyzFile::read_with_bond_factor(&path, 1.1).unwrap();
        assert_eq!(molecule.bond_factor(), 1.1);
        assert!(XyzFile::read_with_bond_factor(&path, -1.0).is_err());
    }
}

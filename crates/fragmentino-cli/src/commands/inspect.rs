use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use fragmentino::core::io::{traits::MolecularFile, xyz::XyzFile};
use fragmentino::core::models::molecule::Molecule;
use fragmentino::core::topology::bonds;
use nalgebra::Point3;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Structural overview of a molecule as printed by `fragmentino inspect`.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectReport {
    pub comment: String,
    pub n_atoms: usize,
    pub formula: String,
    pub bond_factor: f64,
    pub n_bonds: usize,
    pub center_of_mass: Option<Point3<f64>>,
}

impl InspectReport {
    pub fn new(molecule: &Molecule, comment: &str) -> Self {
        Self {
            comment: comment.to_string(),
            n_atoms: molecule.len(),
            formula: hill_formula(molecule),
            bond_factor: molecule.bond_factor(),
            n_bonds: bonds::bonds_within(molecule).len(),
            center_of_mass: molecule.center_of_mass(),
        }
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.comment.is_empty() {
            writeln!(f, "Comment:        {}", self.comment)?;
        }
        writeln!(f, "Atoms:          {}", self.n_atoms)?;
        writeln!(f, "Formula:        {}", self.formula)?;
        writeln!(
            f,
            "Bonds:          {} (bond factor {})",
            self.n_bonds, self.bond_factor
        )?;
        match self.center_of_mass {
            Some(com) => write!(
                f,
                "Center of mass: {:.6} {:.6} {:.6}",
                com.x, com.y, com.z
            ),
            None => write!(f, "Center of mass: n/a"),
        }
    }
}

/// Formula in Hill order: carbon, then hydrogen, then the rest alphabetically. Without
/// carbon every element is alphabetical.
fn hill_formula(molecule: &Molecule) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for symbol in molecule.symbols() {
        *counts.entry(symbol).or_default() += 1;
    }

    let mut ordered = Vec::with_capacity(counts.len());
    if let Some(carbon) = counts.remove("C") {
        ordered.push(("C", carbon));
        if let Some(hydrogen) = counts.remove("H") {
            ordered.push(("H", hydrogen));
        }
    }
    ordered.extend(counts);

    ordered
        .into_iter()
        .map(|(symbol, count)| match count {
            1 => symbol.to_string(),
            n => format!("{}{}", symbol, n),
        })
        .collect()
}

pub fn run(args: InspectArgs) -> Result<InspectReport> {
    info!("Loading input structure from {:?}", &args.input);
    let (mut molecule, metadata) =
        XyzFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;
    if let Some(factor) = args.bond_factor {
        molecule
            .set_bond_factor(factor)
            .map_err(|e| CliError::Argument(e.to_string()))?;
    }

    let report = InspectReport::new(&molecule, &metadata.comment);
    println!("{}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ethanol() -> Molecule {
        Molecule::new(
            &[6, 6, 8, 1, 1, 1, 1, 1, 1],
            vec![
                Point3::new(-0.748, -0.015, 0.024),
                Point3::new(0.558, 0.420, -0.657),
                Point3::new(0.716, 1.822, -0.401),
                Point3::new(-1.293, 0.876, 0.394),
                Point3::new(-1.413, -0.529, -0.674),
                Point3::new(-0.601, -0.666, 0.885),
                Point3::new(1.420, -0.111, -0.244),
                Point3::new(0.488, 0.221, -1.735),
                Point3::new(0.640, 2.036, 0.550),
            ],
        )
        .unwrap()
    }

    #[test]
    fn hill_formula_puts_carbon_and_hydrogen_first() {
        assert_eq!(hill_formula(&ethanol()), "C2H6O");
    }

    #[test]
    fn hill_formula_without_carbon_is_alphabetical() {
        let water = Molecule::new(&[8, 1, 1], vec![Point3::origin(); 3]).unwrap();
        assert_eq!(hill_formula(&water), "H2O");
    }

    #[test]
    fn report_counts_bonds_and_formats_summary() {
        let report = InspectReport::new(&ethanol(), "ethanol");
        assert_eq!(report.n_atoms, 9);
        assert_eq!(report.n_bonds, 8);
        let text = report.to_string();
        assert!(text.starts_with("Comment:        ethanol\n"));
        assert!(text.contains("Formula:        C2H6O"));
        assert!(text.contains("Bonds:          8 (bond factor 1.3)"));
    }

    #[test]
    fn run_rejects_invalid_bond_factor() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("h2.xyz");
        std::fs::write(&input, "2\n\nH 0 0 0\nH 0 0 0.74\n").unwrap();

        let args = InspectArgs {
            input: input.clone(),
            bond_factor: Some(-1.0),
        };
        assert!(matches!(run(args), Err(CliError::Argument(_))));

        let args = InspectArgs {
            input,
            bond_factor: None,
        };
        let report = run(args).unwrap();
        assert_eq!(report.n_bonds, 1);
    }

    #[test]
    fn run_reports_missing_file() {
        let args = InspectArgs {
            input: PathBuf::from("does/not/exist.xyz"),
            bond_factor: None,
        };
        assert!(matches!(run(args), Err(CliError::FileParsing { .. })));
    }
}

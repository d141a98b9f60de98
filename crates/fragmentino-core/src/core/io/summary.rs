use crate::core::models::molecule::Molecule;
use nalgebra::Point3;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV writing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Fragment {index} has {atoms} atoms but {capping_hydrogens} capping hydrogens")]
    InvalidCapCount {
        index: usize,
        atoms: usize,
        capping_hydrogens: usize,
    },
}

/// One row of the fragment summary report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentRecord {
    pub index: usize,
    pub atoms: usize,
    pub capping_hydrogens: usize,
    pub com_x: f64,
    pub com_y: f64,
    pub com_z: f64,
}

impl FragmentRecord {
    /// Builds the record for the fragment at `index`. An empty fragment reports its
    /// centre of mass at the origin.
    pub fn new(
        index: usize,
        fragment: &Molecule,
        capping_hydrogens: usize,
    ) -> Result<Self, SummaryError> {
        if capping_hydrogens > fragment.len() {
            return Err(SummaryError::InvalidCapCount {
                index,
                atoms: fragment.len(),
                capping_hydrogens,
            });
        }
        let com = fragment.center_of_mass().unwrap_or_else(Point3::origin);
        Ok(Self {
            index,
            atoms: fragment.len(),
            capping_hydrogens,
            com_x: com.x,
            com_y: com.y,
            com_z: com.z,
        })
    }
}

/// Writes `records` as CSV with a header row to `writer`.
///
/// `label` names the destination in error messages.
pub fn write_records<W: Write>(
    records: &[FragmentRecord],
    writer: W,
    label: &str,
) -> Result<(), SummaryError> {
    let csv_error = |source| SummaryError::Csv {
        path: label.to_string(),
        source,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record).map_err(csv_error)?;
    }
    csv_writer.flush().map_err(|e| SummaryError::Io {
        path: label.to_string(),
        source: e,
    })
}

/// Writes the summary report for `fragments` to `path`, creating or truncating it.
///
/// `capping_hydrogens[i]` is the number of capping hydrogens appended to fragment `i`;
/// missing entries count as zero.
pub fn write_summary(
    path: &Path,
    fragments: &[Molecule],
    capping_hydrogens: &[usize],
) -> Result<(), SummaryError> {
    let records = fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| {
            FragmentRecord::new(i, fragment, capping_hydrogens.get(i).copied().unwrap_or(0))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let file = std::fs::File::create(path).map_err(|e| SummaryError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_records(&records, std::io::BufWriter::new(file), &path.to_string_lossy())
}

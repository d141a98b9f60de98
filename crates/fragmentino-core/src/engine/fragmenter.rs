use super::config::FragmentationConfig;
use super::error::EngineError;
use super::graph::{ContractableGraph, Edge, Mergeable};
use super::progress::{Progress, ProgressReporter};
use crate::core::io::summary;
use crate::core::io::traits::MolecularFile;
use crate::core::io::xyz::{XyzFile, XyzMetadata};
use crate::core::models::element::{self, Element};
use crate::core::models::molecule::Molecule;
use crate::core::topology::bonds;
use crate::core::utils::geometry;
use nalgebra::Point3;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

impl Mergeable for Molecule {
    fn merge(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }

    fn size(&self) -> usize {
        self.len()
    }
}

/// Splits a molecule into size-bounded fragments and repairs the bonds cut between them.
///
/// Fragments are the vertices of a [`ContractableGraph`] over [`Molecule`]s; the edges
/// that survive contraction are the capped bonds. Fragment order is significant for
/// output files and can be changed with [`MolecularFragmenter::swap_fragments`],
/// [`MolecularFragmenter::move_central_fragment_to_front`] and
/// [`MolecularFragmenter::group_fragments_by_size`].
pub struct MolecularFragmenter {
    molecule: Molecule,
    config: FragmentationConfig,
    graph: ContractableGraph<Molecule>,
    capping_hydrogens: Vec<usize>,
    fragmented: bool,
    capped: bool,
}

impl MolecularFragmenter {
    /// Prepares a fragmenter. No work is done until [`MolecularFragmenter::fragment`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Molecule`] if the configured bond factor override is invalid.
    pub fn new(mut molecule: Molecule, config: FragmentationConfig) -> Result<Self, EngineError> {
        if let Some(factor) = config.bond_factor {
            molecule.set_bond_factor(factor)?;
        }
        Ok(Self {
            graph: ContractableGraph::new(config.max_fragment_size),
            molecule,
            config,
            capping_hydrogens: Vec::new(),
            fragmented: false,
            capped: false,
        })
    }

    pub fn fragment(&mut self) -> Result<(), EngineError> {
        self.fragment_with_progress(&ProgressReporter::new())
    }

    /// Builds one single-atom fragment per atom, joins bonded atoms with edges weighted by
    /// bond length and contracts the graph. Any previous fragmentation, including caps,
    /// is discarded.
    #[instrument(skip_all, name = "fragmentation", fields(atoms = self.molecule.len(), max_fragment_size = self.config.max_fragment_size))]
    pub fn fragment_with_progress(&mut self, reporter: &ProgressReporter) -> Result<(), EngineError> {
        let bond_factor = self.molecule.bond_factor();
        let mut graph = ContractableGraph::new(self.config.max_fragment_size);
        graph.add_vertices(
            self.molecule
                .iter()
                .map(|(element, position)| Molecule::single_atom(element, *position, bond_factor)),
        );

        let detected = reporter.phase("Bond detection", || bonds::bonds_within(&self.molecule));
        info!(
            "Detected {} bonds between {} atoms.",
            detected.len(),
            self.molecule.len()
        );
        for bond in &detected {
            graph.add_edge(bond.atom1, bond.atom2, bond.distance)?;
        }

        reporter.phase("Contraction", || graph.contract_with_progress(reporter));

        self.capping_hydrogens = vec![0; graph.n_vertices()];
        self.graph = graph;
        self.fragmented = true;
        self.capped = false;

        info!(
            "Fragmentation produced {} fragments with {} capped bonds.",
            self.n_fragments(),
            self.n_capped_bonds()
        );
        Ok(())
    }

    pub fn add_hydrogens_to_capped_bonds(&mut self) -> usize {
        self.add_hydrogens_with_progress(&ProgressReporter::new())
    }

    /// Caps every bond cut by fragmentation with one hydrogen on each side.
    ///
    /// Each hydrogen sits on the line between the two bonded atoms, at the covalent
    /// bond length between its anchor atom and hydrogen. Cap positions are computed from
    /// the uncapped fragments. Returns the number of hydrogens added; calling it again
    /// adds nothing.
    #[instrument(skip_all, name = "bond_capping")]
    pub fn add_hydrogens_with_progress(&mut self, reporter: &ProgressReporter) -> usize {
        if self.capped {
            warn!("Capped bonds already carry hydrogens; skipping.");
            return 0;
        }

        let caps = reporter.phase("Capping", || {
            reporter.report(Progress::TaskStart {
                total_steps: self.graph.n_edges() as u64,
            });
            let mut caps = Vec::new();
            for edge in self.graph.edges() {
                caps.extend(self.caps_for_edge(edge));
                reporter.report(Progress::TaskIncrement);
            }
            reporter.report(Progress::TaskFinish);
            caps
        });

        let hydrogen = Element::hydrogen();
        for &(index, position) in &caps {
            if let Some(fragment) = self.graph.vertex_mut(index) {
                fragment.add_atom(hydrogen, position);
                self.capping_hydrogens[index] += 1;
            }
        }
        self.capped = true;

        info!(
            "Added {} capping hydrogens across {} bonds.",
            caps.len(),
            self.n_capped_bonds()
        );
        caps.len()
    }

    fn caps_for_edge(&self, edge: &Edge) -> Vec<(usize, Point3<f64>)> {
        let hydrogen = Element::hydrogen();
        let first = &self.fragments()[edge.v1];
        let second = &self.fragments()[edge.v2];

        let cap = |fragment: &Molecule, atom: usize, toward: &Point3<f64>| {
            let scale = if self.config.scale_cap_length {
                fragment.bond_factor()
            } else {
                1.0
            };
            let length = element::bond_length(fragment.elements()[atom], hydrogen, scale);
            geometry::cap_position(&fragment.positions()[atom], toward, length)
        };

        let mut caps = Vec::new();
        for bond in bonds::bonds_between(first, second) {
            let p1 = first.positions()[bond.atom1];
            let p2 = second.positions()[bond.atom2];
            match (cap(first, bond.atom1, &p2), cap(second, bond.atom2, &p1)) {
                (Some(c1), Some(c2)) => {
                    caps.push((edge.v1, c1));
                    caps.push((edge.v2, c2));
                }
                _ => warn!(
                    "Atoms {} and {} of fragments {} and {} coincide; bond left uncapped.",
                    bond.atom1, bond.atom2, edge.v1, edge.v2
                ),
            }
        }
        debug!(v1 = edge.v1, v2 = edge.v2, caps = caps.len(), "Computed caps for edge.");
        caps
    }

    /// Index of the fragment whose centre of mass is closest to the mean of all fragment
    /// centres of mass. Ties resolve to the lowest index.
    pub fn find_central_fragment(&self) -> Option<usize> {
        let centers = self
            .fragments()
            .iter()
            .map(Molecule::center_of_mass)
            .collect::<Option<Vec<_>>>()?;
        let mean = geometry::centroid(&centers)?;
        geometry::index_of_closest(&centers, &mean)
    }

    /// Swaps the central fragment into position 0 and returns where it came from.
    pub fn move_central_fragment_to_front(&mut self) -> Result<Option<usize>, EngineError> {
        let Some(central) = self.find_central_fragment() else {
            return Ok(None);
        };
        self.swap_fragments(central, 0)?;
        debug!("Moved central fragment {} to the front.", central);
        Ok(Some(central))
    }

    pub fn swap_fragments(&mut self, f1: usize, f2: usize) -> Result<(), EngineError> {
        self.graph.swap_vertices(f1, f2)?;
        self.capping_hydrogens.swap(f1, f2);
        Ok(())
    }

    /// Reorders fragments so that equally sized fragments tend to sit next to each other.
    ///
    /// For each position `i`, the first later fragment with the same atom count is
    /// swapped into position `i + 1`. This is a single greedy pass, not a sort.
    pub fn group_fragments_by_size(&mut self) -> Result<(), EngineError> {
        let n = self.n_fragments();
        for i in 0..n {
            let size = self.fragments()[i].len();
            let partner = ((i + 1)..n).find(|&j| self.fragments()[j].len() == size);
            if let Some(j) = partner {
                self.swap_fragments(i + 1, j)?;
            }
        }
        Ok(())
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    pub fn config(&self) -> &FragmentationConfig {
        &self.config
    }

    pub fn n_fragments(&self) -> usize {
        self.graph.n_vertices()
    }

    pub fn fragment_sizes(&self) -> Vec<usize> {
        self.fragments().iter().map(Molecule::len).collect()
    }

    pub fn n_capped_bonds(&self) -> usize {
        self.graph.n_edges()
    }

    pub fn fragments(&self) -> &[Molecule] {
        self.graph.vertices()
    }

    pub fn fragment_at(&self, index: usize) -> Option<&Molecule> {
        self.graph.vertex(index)
    }

    /// Bonds between fragments, as edges over fragment indices weighted by bond length.
    pub fn capped_bonds(&self) -> &[Edge] {
        self.graph.edges()
    }

    /// Number of capping hydrogens appended to each fragment.
    pub fn capping_hydrogens(&self) -> &[usize] {
        &self.capping_hydrogens
    }

    pub fn is_fragmented(&self) -> bool {
        self.fragmented
    }

    pub fn is_capped(&self) -> bool {
        self.capped
    }

    /// Writes fragment `i` to `<prefix>_fragment_<i>.xyz` and returns the paths written.
    pub fn write_separate(&self, prefix: &Path) -> Result<Vec<PathBuf>, EngineError> {
        self.ensure_fragmented()?;
        let n = self.n_fragments();
        self.fragments()
            .iter()
            .enumerate()
            .map(|(i, fragment)| -> Result<PathBuf, EngineError> {
                let path = prefixed_path(prefix, &format!("_fragment_{}.xyz", i));
                let metadata = XyzMetadata::with_comment(format!("Fragment {} of {}", i, n));
                write_xyz(fragment, &metadata, &path)?;
                Ok(path)
            })
            .collect()
    }

    /// Writes all fragments, in order, to `<prefix>_fragmented.xyz`.
    pub fn write_combined(&self, prefix: &Path) -> Result<PathBuf, EngineError> {
        self.ensure_fragmented()?;
        let combined = match self.fragments().iter().cloned().reduce(Mergeable::merge) {
            Some(molecule) => molecule,
            None => Molecule::from_elements(Vec::new(), Vec::new(), self.molecule.bond_factor())?,
        };
        let sizes = self
            .fragment_sizes()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let metadata = XyzMetadata::with_comment(format!(
            "{} fragments, sizes: {}",
            self.n_fragments(),
            sizes
        ));

        let path = prefixed_path(prefix, "_fragmented.xyz");
        write_xyz(&combined, &metadata, &path)?;
        Ok(path)
    }

    /// Writes the CSV fragment summary to `path`.
    pub fn write_summary(&self, path: &Path) -> Result<(), EngineError> {
        self.ensure_fragmented()?;
        summary::write_summary(path, self.fragments(), &self.capping_hydrogens)?;
        Ok(())
    }

    fn ensure_fragmented(&self) -> Result<(), EngineError> {
        if self.fragmented {
            Ok(())
        } else {
            Err(EngineError::NotFragmented)
        }
    }
}

impl fmt::Display for MolecularFragmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MolecularFragmenter Fragments: {} Capped bonds: {}",
            self.n_fragments(),
            self.n_capped_bonds()
        )
    }
}

fn prefixed_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn write_xyz(molecule: &Molecule, metadata: &XyzMetadata, path: &Path) -> Result<(), EngineError> {
    XyzFile::write_to_path(molecule, metadata, path).map_err(|e| EngineError::FragmentOutput {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

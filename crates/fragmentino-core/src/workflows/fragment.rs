use crate::core::models::molecule::Molecule;
use crate::engine::config::FragmentationConfig;
use crate::engine::error::EngineError;
use crate::engine::fragmenter::MolecularFragmenter;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

/// Headline numbers of a fragmentation run.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentationSummary {
    pub n_atoms: usize,
    pub n_fragments: usize,
    pub fragment_sizes: Vec<usize>,
    pub n_capped_bonds: usize,
    pub hydrogens_added: usize,
    /// Index the central fragment had before it was moved to the front.
    pub central_fragment: Option<usize>,
}

pub struct FragmentationResult {
    pub fragmenter: MolecularFragmenter,
    pub summary: FragmentationSummary,
}

/// Fragments `molecule` and applies the post-processing steps enabled in `config`:
/// bond capping, then moving the central fragment to the front, then grouping by size.
#[instrument(skip_all, name = "fragmentation_workflow")]
pub fn run(
    molecule: Molecule,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Result<FragmentationResult, EngineError> {
    let n_atoms = molecule.len();
    info!(
        "Starting fragmentation of {} atoms (max fragment size {}).",
        n_atoms, config.max_fragment_size
    );

    let mut fragmenter = MolecularFragmenter::new(molecule, config.clone())?;
    fragmenter.fragment_with_progress(reporter)?;

    let hydrogens_added = if config.cap_bonds {
        fragmenter.add_hydrogens_with_progress(reporter)
    } else {
        0
    };

    let central_fragment = if config.center_first {
        reporter.phase("Reordering", || fragmenter.move_central_fragment_to_front())?
    } else {
        None
    };

    if config.group_by_size {
        reporter.phase("Grouping", || fragmenter.group_fragments_by_size())?;
    }

    let summary = FragmentationSummary {
        n_atoms,
        n_fragments: fragmenter.n_fragments(),
        fragment_sizes: fragmenter.fragment_sizes(),
        n_capped_bonds: fragmenter.n_capped_bonds(),
        hydrogens_added,
        central_fragment,
    };
    reporter.report(Progress::Message(format!(
        "{} fragments, {} capped bonds",
        summary.n_fragments, summary.n_capped_bonds
    )));
    info!("Workflow complete: {}.", fragmenter);

    Ok(FragmentationResult {
        fragmenter,
        summary,
    })
}

use crate::cli::FragmentArgs;
use crate::config::{DefaultsConfig, PartialFragmentConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use fragmentino::{
    core::io::{traits::MolecularFile, xyz::XyzFile},
    engine::progress::ProgressReporter,
    workflows::{self, fragment::FragmentationSummary},
};
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub fn run(args: FragmentArgs, quiet: bool) -> Result<FragmentationSummary> {
    let partial_config = PartialFragmentConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args, &DefaultsConfig::default())?;
    debug!("Resolved configuration: {:?}", config);

    info!("Loading input structure from {:?}", &args.input);
    let (molecule, metadata) =
        XyzFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;
    if !metadata.comment.is_empty() {
        debug!("Input comment: {}", metadata.comment);
    }
    if molecule.is_empty() {
        warn!("Input structure contains no atoms.");
    }

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Fragmenting {} atoms (max fragment size {})...",
        molecule.len(),
        config.max_fragment_size
    );
    let result = workflows::fragment::run(molecule, &config, &reporter)?;
    let fragmenter = &result.fragmenter;

    let prefix = output_prefix(&args);
    let combined = fragmenter.write_combined(&prefix)?;
    println!("✓ Fragments written to: {}", combined.display());

    if args.separate {
        let paths = fragmenter.write_separate(&prefix)?;
        println!("✓ {} fragment files written with prefix: {}", paths.len(), prefix.display());
    }

    if let Some(summary_path) = &args.summary {
        fragmenter.write_summary(summary_path)?;
        println!("✓ Summary written to: {}", summary_path.display());
    }

    print_summary(&result.summary);
    Ok(result.summary)
}

/// Explicit `--output`, or the input path with its extension removed.
fn output_prefix(args: &FragmentArgs) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| args.input.with_extension(""))
}

fn print_summary(summary: &FragmentationSummary) {
    println!(
        "{} atoms -> {} fragments, {} capped bonds, {} capping hydrogens",
        summary.n_atoms, summary.n_fragments, summary.n_capped_bonds, summary.hydrogens_added
    );
    if let Some(central) = summary.central_fragment {
        println!("  Central fragment (was #{}) moved to the front.", central);
    }
    let sizes = summary
        .fragment_sizes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    println!("  Fragment sizes: {}", sizes);
}

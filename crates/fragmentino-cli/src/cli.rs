use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "fragmentino - split molecular structures into size-bounded fragments and cap the bonds cut between them.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress display
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fragment a molecule and write the fragments as XYZ files.
    Fragment(FragmentArgs),
    /// Print atom, bond and centre-of-mass information for a structure.
    Inspect(InspectArgs),
}

/// Arguments for the `fragment` subcommand.
#[derive(Args, Debug)]
pub struct FragmentArgs {
    // --- Core Arguments ---
    /// Path to the input structure file (XYZ format).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Prefix for output files. Defaults to the input path without its extension.
    #[arg(short, long, value_name = "PREFIX")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Fragmentation Overrides ---
    /// Maximum number of atoms per fragment, before capping.
    #[arg(short, long, value_name = "INT")]
    pub max_fragment_size: Option<usize>,

    /// Multiplier on the sum of covalent radii used to detect bonds.
    #[arg(short, long, value_name = "FLOAT")]
    pub bond_factor: Option<f64>,

    /// Do not add capping hydrogens to bonds cut between fragments.
    #[arg(long)]
    pub no_cap: bool,

    /// Move the fragment closest to the molecular centre to the front.
    #[arg(long)]
    pub center: bool,

    /// Reorder fragments so that fragments of equal size are adjacent.
    #[arg(long)]
    pub group_by_size: bool,

    // --- Output Options ---
    /// Also write each fragment to its own file.
    #[arg(long)]
    pub separate: bool,

    /// Write a CSV summary of the fragments to this path.
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S capping.scale-length=false
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the input structure file (XYZ format).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Multiplier on the sum of covalent radii used to detect bonds.
    #[arg(short, long, value_name = "FLOAT")]
    pub bond_factor: Option<f64>,
}

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
    author = "The LJ-Baseline Developers",
    version,
    about = "LJ-Baseline CLI - Shifted, truncated Lennard-Jones energies for batches of atomistic configurations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the Lennard-Jones energy of every frame of an XYZ file.
    Evaluate(EvaluateArgs),
    /// Print the mixed Lennard-Jones parameters of every pair of atom types.
    Pairs(PairsArgs),
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    // --- Core Arguments ---
    /// Path to the input frames in (extended) XYZ format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the run configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write per-frame energies to this CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Potential Overrides ---
    /// Override the per-type parameter file (TOML or CSV).
    #[arg(short, long, value_name = "PATH")]
    pub parameters: Option<PathBuf>,

    /// Override the cutoff radius.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub cutoff: Option<f64>,

    /// Build and evaluate full neighbor lists instead of half lists.
    #[arg(long)]
    pub full_neighbor_list: bool,

    /// Check every half neighbor list for pairs stored in both orientations.
    #[arg(long)]
    pub check_neighbor_list: bool,

    // --- Output Overrides ---
    /// Also compute the energy of every atom.
    #[arg(long)]
    pub per_atom: bool,

    /// Write per-atom energies to this CSV file (implies --per-atom).
    #[arg(long, value_name = "PATH")]
    pub per_atom_output: Option<PathBuf>,

    /// Only count pairs involving these atom indices (comma-separated), in every frame.
    #[arg(long, value_name = "INDICES", value_delimiter = ',')]
    pub select: Option<Vec<usize>>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S potential.cutoff=7.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `pairs` subcommand.
#[derive(Args, Debug)]
pub struct PairsArgs {
    /// Path to the per-type parameter file (TOML or CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub parameters: PathBuf,

    /// Cutoff radius used for the energy shift.
    #[arg(long, required = true, value_name = "FLOAT", allow_negative_numbers = true)]
    pub cutoff: f64,
}

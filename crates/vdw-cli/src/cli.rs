use clap::{Args, Parser, Subcommand};
use halvdw::engine::config::NonbondedMethod;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "halvdw - buffered 14-7 van der Waals energies and forces with reduced interaction sites.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for the pair loop.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the van der Waals energy and per-particle forces of a system.
    Eval(EvalArgs),
    /// List the accepted sigma and epsilon combining rule names.
    Rules,
}

/// Arguments for the `eval` subcommand.
#[derive(Args, Debug, Clone)]
pub struct EvalArgs {
    /// Path to the particle system in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub system: PathBuf,

    /// Path to the kernel configuration in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write per-particle forces to a CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Kernel Overrides ---
    /// Override the nonbonded method (no-cutoff, cutoff-non-periodic, cutoff-periodic).
    #[arg(short, long, value_name = "METHOD")]
    pub method: Option<NonbondedMethod>,

    /// Override the sigma combining rule (e.g. 'cubic-mean').
    #[arg(long, value_name = "RULE")]
    pub sigma_rule: Option<String>,

    /// Override the epsilon combining rule (e.g. 'hhg').
    #[arg(long, value_name = "RULE")]
    pub epsilon_rule: Option<String>,

    /// Override the cutoff distance in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,
}

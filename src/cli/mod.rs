//! Command-line interface definitions.

pub mod check;
pub mod enumerate;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// latbox - exact enumeration of lattice points inside a rational box.
#[derive(Parser, Debug)]
#[command(name = "latbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate all lattice points inside the box
    Enumerate(EnumerateArgs),

    /// Validate a problem description without searching
    Check(CheckArgs),
}

/// Arguments for the `enumerate` subcommand.
#[derive(Parser, Debug)]
pub struct EnumerateArgs {
    /// Problem description file (standard input when omitted)
    pub input: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, default_value = "latbox.toml")]
    pub config: PathBuf,

    /// Override the thread budget for the branch search
    #[arg(long)]
    pub threads: Option<usize>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Problem description file (standard input when omitted)
    pub input: Option<PathBuf>,
}

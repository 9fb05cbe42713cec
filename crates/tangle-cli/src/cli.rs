use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tangle",
    about = "Tangle — deep-merge and walk JSON documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with `[merge]` and `[walk]` option tables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge JSON documents left to right and print the result
    Merge(MergeArgs),
    /// Print every node of a JSON document, depth-first
    Walk(WalkArgs),
}

#[derive(Args, Default)]
pub struct MergeArgs {
    /// Input files; `-` reads standard input. The first file is the target.
    #[arg(required = true)]
    pub files: Vec<String>,
    /// Only write back `after` results for properties that were not containers
    #[arg(long)]
    pub literal_after: bool,
    /// Only treat references to the merge target itself as self-references;
    /// nesting is bounded at 256 unless a bound is configured
    #[arg(long)]
    pub root_only_cycles: bool,
    /// Maximum nesting of recursive merges
    #[arg(long, conflicts_with = "unbounded")]
    pub max_depth: Option<usize>,
    /// Remove the nesting bound
    #[arg(long)]
    pub unbounded: bool,
    /// Print the result on a single line
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Default)]
pub struct WalkArgs {
    /// Input file; `-` reads standard input
    pub file: String,
    /// Do not descend below this depth
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Stop after this many nodes
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

//! CLI argument parsing with clap derive

use std::path::PathBuf;

use clap::Parser;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// git-sweep - Delete merged branches duplicated locally and on remotes
#[derive(Parser, Debug)]
#[command(name = "git-sweep")]
#[command(version = VERSION)]
#[command(about = "Delete merged branches, both locally and on the given remotes")]
#[command(long_about = "Delete branches that have been merged into the current branch, both locally and on the given remote(s).\n\nA branch is swept when a local branch and a remote-tracking branch share the same name and commit, and that commit is merged into HEAD. main, master and the current branch are never swept.\n\nA local branch is only deleted once no unselected remote still holds a copy of it, so the local branch keeps pointing at copies that were not cleaned.\n\nWith no remotes given, git-sweep only reports what it would do unless --no-dry-run is passed.")]
pub struct Cli {
    /// Remotes to delete merged branches from
    #[arg(value_name = "REMOTE")]
    pub remotes: Vec<String>,

    /// Show the plan and commands without deleting anything
    #[arg(long, overrides_with = "no_dry_run")]
    pub dry_run: bool,

    /// Run deletions even when no remote is given
    #[arg(long, overrides_with = "dry_run")]
    pub no_dry_run: bool,

    /// Repository to operate on (default: current directory)
    #[arg(short = 'C', long = "repo", value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Config file (default: <config dir>/git-sweep/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

impl Cli {
    /// `Some(true)` for --dry-run, `Some(false)` for --no-dry-run, `None` if neither
    pub fn dry_run_flag(&self) -> Option<bool> {
        if self.dry_run {
            Some(true)
        } else if self.no_dry_run {
            Some(false)
        } else {
            None
        }
    }
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}

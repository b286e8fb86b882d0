//! Git collaborators
//!
//! The engine never touches the repository directly. It reads refs through
//! [`RefLister`] and [`CurrentBranchProvider`] and deletes through
//! [`CommandRunner`]. [`GitCli`] implements all three with the git binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::SweepError;

/// `for-each-ref` format producing `<ref> <commit> [<upstream>]` lines
pub const REF_FORMAT: &str = "%(refname) %(objectname) %(upstream)";

/// Source of the raw ref listings
pub trait RefLister {
    /// Remote listing, one `<remote> <url> ...` per line
    fn list_remotes(&self) -> Result<String, SweepError>;

    /// Refs merged into the current branch, one `<ref> <commit> [<upstream>]` per line
    fn list_merged_refs(&self) -> Result<String, SweepError>;
}

pub trait CurrentBranchProvider {
    /// The checked-out branch, `None` on a detached HEAD
    fn current_branch(&self) -> Result<Option<String>, SweepError>;
}

/// Executes batched deletions; failures must be returned, never swallowed
pub trait CommandRunner {
    fn delete_remote_branches(&self, remote: &str, names: &[String]) -> Result<(), SweepError>;

    fn delete_local_branches(&self, names: &[String]) -> Result<(), SweepError>;
}

/// Git CLI wrapper rooted at one repository
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Path to the git binary
    pub git_path: String,
    /// Repository to run in
    pub repo_root: PathBuf,
}

impl GitCli {
    pub fn new(git_path: impl Into<String>, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            git_path: git_path.into(),
            repo_root: repo_root.into(),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<Output, SweepError> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        tracing::debug!("running {} {}", self.git_path, args.join(" "));

        Command::new(&self.git_path)
            .arg("-C")
            .arg(&self.repo_root)
            .args(&args)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SweepError::GitNotFound {
                        program: self.git_path.clone(),
                    }
                } else {
                    SweepError::Io(e)
                }
            })
    }

    /// Run git and return stdout, turning a non-zero exit into `CommandFailed`
    fn run_checked<S: AsRef<str>>(&self, args: &[S]) -> Result<String, SweepError> {
        let output = self.run(args)?;

        if !output.status.success() {
            let command = std::iter::once("git")
                .chain(args.iter().map(|a| a.as_ref()))
                .collect::<Vec<_>>()
                .join(" ");
            return Err(SweepError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl RefLister for GitCli {
    fn list_remotes(&self) -> Result<String, SweepError> {
        self.run_checked(&["remote", "-v"])
    }

    fn list_merged_refs(&self) -> Result<String, SweepError> {
        let format = format!("--format={}", REF_FORMAT);
        self.run_checked(&["for-each-ref", "--merged=HEAD", format.as_str(), "refs"])
    }
}

impl CurrentBranchProvider for GitCli {
    fn current_branch(&self) -> Result<Option<String>, SweepError> {
        let stdout = self.run_checked(&["branch", "--show-current"])?;
        let branch = stdout.trim();
        Ok((!branch.is_empty()).then(|| branch.to_string()))
    }
}

impl CommandRunner for GitCli {
    fn delete_remote_branches(&self, remote: &str, names: &[String]) -> Result<(), SweepError> {
        let mut args = vec!["push", "-d", remote];
        args.extend(names.iter().map(String::as_str));
        self.run_checked(args.as_slice()).map(|_| ())
    }

    fn delete_local_branches(&self, names: &[String]) -> Result<(), SweepError> {
        let mut args = vec!["branch", "-d"];
        args.extend(names.iter().map(String::as_str));
        self.run_checked(args.as_slice()).map(|_| ())
    }
}

//! Core data types for sweep

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One local or remote-tracking reference from the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Full reference path (e.g., "refs/remotes/origin/feature")
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Short branch name (e.g., "feature")
    pub name: String,
    /// Commit the ref points to
    pub commit: String,
    /// Owning remote, `None` for local branches
    pub remote: Option<String>,
    /// Configured upstream ref, if any
    pub upstream: Option<String>,
}

impl Branch {
    /// Build a local branch record
    pub fn local(name: &str, commit: &str) -> Self {
        Self {
            ref_name: format!("refs/heads/{}", name),
            name: name.to_string(),
            commit: commit.to_string(),
            remote: None,
            upstream: None,
        }
    }

    /// Build a remote-tracking branch record
    pub fn remote_tracking(remote: &str, name: &str, commit: &str) -> Self {
        Self {
            ref_name: format!("refs/remotes/{}/{}", remote, name),
            name: name.to_string(),
            commit: commit.to_string(),
            remote: Some(remote.to_string()),
            upstream: None,
        }
    }

    /// Set the upstream ref
    pub fn with_upstream(mut self, upstream: &str) -> Self {
        self.upstream = Some(upstream.to_string());
        self
    }

    pub fn is_local(&self) -> bool {
        self.remote.is_none()
    }
}

/// A ref whose remote prefix matched more than one configured remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguousRemoteMatch {
    /// The full ref that was ambiguous
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Every remote whose `refs/remotes/<remote>/` prefix matched
    pub candidates: Vec<String>,
    /// The remote that was chosen (longest identifier)
    pub chosen: String,
}

/// Parsed view of the repository's refs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Configured remotes
    pub remotes: BTreeSet<String>,
    /// Local and remote-tracking branches in listing order
    pub branches: Vec<Branch>,
    /// Refs resolved by longest-prefix match among several remotes
    pub ambiguities: Vec<AmbiguousRemoteMatch>,
}

/// A local branch and a remote-tracking branch with the same name and commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    pub local: Branch,
    pub remote: Branch,
}

impl DuplicateMatch {
    /// Remote that owns the remote-tracking side
    pub fn remote_name(&self) -> &str {
        self.remote.remote.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for DuplicateMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.local.ref_name, self.remote.ref_name)
    }
}

/// Branch names to delete from one remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDeletion {
    pub remote: String,
    pub branches: Vec<String>,
}

/// A deletion command, either executed or reported under dry-run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SweepCommand {
    /// `git push -d <remote> <branches...>`
    DeleteRemote { remote: String, branches: Vec<String> },
    /// `git branch -d <branches...>`
    DeleteLocal { branches: Vec<String> },
}

impl SweepCommand {
    /// The git arguments this command runs with (without the leading `git`)
    pub fn git_args(&self) -> Vec<String> {
        let mut args: Vec<String> = match self {
            SweepCommand::DeleteRemote { remote, .. } => {
                vec!["push".to_string(), "-d".to_string(), remote.clone()]
            }
            SweepCommand::DeleteLocal { .. } => vec!["branch".to_string(), "-d".to_string()],
        };
        args.extend(self.branches().iter().cloned());
        args
    }

    pub fn branches(&self) -> &[String] {
        match self {
            SweepCommand::DeleteRemote { branches, .. } | SweepCommand::DeleteLocal { branches } => {
                branches
            }
        }
    }
}

impl fmt::Display for SweepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.git_args().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_constructors() {
        let local = Branch::local("featA", "c1").with_upstream("refs/remotes/origin/featA");
        assert!(local.is_local());
        assert_eq!(local.ref_name, "refs/heads/featA");
        assert_eq!(local.upstream.as_deref(), Some("refs/remotes/origin/featA"));

        let remote = Branch::remote_tracking("origin", "featA", "c1");
        assert!(!remote.is_local());
        assert_eq!(remote.ref_name, "refs/remotes/origin/featA");
        assert_eq!(remote.remote.as_deref(), Some("origin"));
    }

    #[test]
    fn test_duplicate_match_display() {
        let m = DuplicateMatch {
            local: Branch::local("featA", "c1"),
            remote: Branch::remote_tracking("origin", "featA", "c1"),
        };
        assert_eq!(m.to_string(), "refs/heads/featA = refs/remotes/origin/featA");
        assert_eq!(m.remote_name(), "origin");
    }

    #[test]
    fn test_command_display() {
        let cmd = SweepCommand::DeleteRemote {
            remote: "origin".to_string(),
            branches: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(cmd.to_string(), "git push -d origin a b");

        let cmd = SweepCommand::DeleteLocal {
            branches: vec!["a".to_string()],
        };
        assert_eq!(cmd.to_string(), "git branch -d a");
    }
}

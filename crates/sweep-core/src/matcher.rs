//! Duplicate detection between local and remote-tracking branches

use std::collections::BTreeSet;

use crate::types::{Branch, DuplicateMatch};

/// Branch names protected in every repository
pub const ALWAYS_PROTECTED: [&str; 2] = ["main", "master"];

/// Names that are never swept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedBranches {
    names: BTreeSet<String>,
}

impl Default for ProtectedBranches {
    fn default() -> Self {
        Self::new(Vec::<String>::new(), None)
    }
}

impl ProtectedBranches {
    /// Protect `main`, `master`, the extra `names` and the checked-out branch
    pub fn new<I, S>(names: I, current_branch: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: BTreeSet<String> = ALWAYS_PROTECTED
            .iter()
            .map(|n| n.to_string())
            .chain(names.into_iter().map(Into::into))
            .collect();
        if let Some(current) = current_branch.filter(|c| !c.is_empty()) {
            names.insert(current.to_string());
        }
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Find every local/remote-tracking pair with the same name and commit
///
/// Pairs are considered once each (`i < j`) in listing order. Local/local and
/// remote/remote pairs never match. The local side of each reported match is
/// always `local`.
pub fn find_duplicates(branches: &[Branch], protected: &ProtectedBranches) -> Vec<DuplicateMatch> {
    let mut matches = Vec::new();

    for i in 0..branches.len() {
        for j in (i + 1)..branches.len() {
            let (b1, b2) = (&branches[i], &branches[j]);

            if b1.name != b2.name || b1.commit != b2.commit {
                continue;
            }
            if protected.contains(&b1.name) {
                continue;
            }

            let (local, remote) = match (b1.is_local(), b2.is_local()) {
                (true, false) => (b1, b2),
                (false, true) => (b2, b1),
                _ => continue,
            };

            tracing::info!("{} = {}", local.ref_name, remote.ref_name);
            matches.push(DuplicateMatch {
                local: local.clone(),
                remote: remote.clone(),
            });
        }
    }

    matches
}

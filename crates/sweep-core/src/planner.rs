//! Deletion planning
//!
//! A [`DeletionPlan`] records every remote copy and local candidate found by
//! the matcher. Resolving it against the remotes selected for this run gives
//! the batches that will be issued, and the local branches that are safe to
//! delete. A local branch is kept whenever a copy of it survives on a remote
//! that is not being cleaned, so that it still points at that copy.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{DuplicateMatch, RemoteDeletion};

/// Everything the matcher found, before remote selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionPlan {
    /// Local branch names in discovery order; a name appears once per match
    pub local_candidates: Vec<String>,
    /// Remote branch names per remote, remotes and names in discovery order
    pub remote_deletions: Vec<RemoteDeletion>,
}

impl DeletionPlan {
    pub fn from_matches(matches: &[DuplicateMatch]) -> Self {
        let mut plan = DeletionPlan::default();
        for m in matches {
            plan.push(m.remote_name(), &m.remote.name, &m.local.name);
        }
        plan
    }

    fn push(&mut self, remote: &str, remote_branch: &str, local_branch: &str) {
        match self.remote_deletions.iter_mut().find(|d| d.remote == remote) {
            Some(deletion) => deletion.branches.push(remote_branch.to_string()),
            None => self.remote_deletions.push(RemoteDeletion {
                remote: remote.to_string(),
                branches: vec![remote_branch.to_string()],
            }),
        }
        self.local_candidates.push(local_branch.to_string());
    }

    /// Branch names staged on `remote`, empty if none
    pub fn branches_on(&self, remote: &str) -> &[String] {
        self.remote_deletions
            .iter()
            .find(|d| d.remote == remote)
            .map(|d| d.branches.as_slice())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.local_candidates.is_empty() && self.remote_deletions.is_empty()
    }

    /// Restrict the plan to the remotes selected for this run
    ///
    /// Selected remotes are treated as cleaned. Every other remote keeps its
    /// copies, and local candidates with a copy there are withheld.
    pub fn resolve(&self, selected: &[String]) -> ResolvedPlan {
        let mut seen = BTreeSet::new();
        let mut remote_batches = Vec::new();

        for remote in selected {
            if !seen.insert(remote.as_str()) {
                continue;
            }
            let branches = self.branches_on(remote);
            if !branches.is_empty() {
                remote_batches.push(RemoteDeletion {
                    remote: remote.clone(),
                    branches: branches.to_vec(),
                });
            }
        }

        let cleaned: Vec<&str> = remote_batches.iter().map(|b| b.remote.as_str()).collect();
        let (locals_to_delete, withheld_locals) = self.partition_locals(&cleaned);

        ResolvedPlan {
            remote_batches,
            locals_to_delete,
            withheld_locals,
        }
    }

    /// Split local candidates into (deletable, withheld) given the remotes
    /// whose copies are gone
    pub fn partition_locals(&self, cleaned: &[&str]) -> (BTreeSet<String>, BTreeSet<String>) {
        let mut deletable = BTreeSet::new();
        let mut withheld = BTreeSet::new();

        for name in &self.local_candidates {
            let survives_elsewhere = self
                .remote_deletions
                .iter()
                .filter(|d| !cleaned.contains(&d.remote.as_str()))
                .any(|d| d.branches.contains(name));

            if survives_elsewhere {
                withheld.insert(name.clone());
            } else {
                deletable.insert(name.clone());
            }
        }

        (deletable, withheld)
    }
}

/// The plan as it applies to one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlan {
    /// One batch per selected remote with something to delete, in selection order
    pub remote_batches: Vec<RemoteDeletion>,
    /// Local branches with no surviving remote copy
    pub locals_to_delete: BTreeSet<String>,
    /// Local branches kept because an unselected remote still has a copy
    pub withheld_locals: BTreeSet<String>,
}

//! The parse → match → plan pipeline

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::SweepError;
use crate::git::{CurrentBranchProvider, RefLister};
use crate::matcher::{ProtectedBranches, find_duplicates};
use crate::parser::parse_snapshot;
use crate::planner::DeletionPlan;
use crate::types::{DuplicateMatch, Snapshot};

/// Result of analyzing one ref snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub snapshot: Snapshot,
    pub current_branch: Option<String>,
    pub matches: Vec<DuplicateMatch>,
    pub plan: DeletionPlan,
}

impl Analysis {
    /// Selected remotes that are not configured in the repository, each
    /// reported once in first-occurrence order
    pub fn unknown_remotes<'s>(&self, selected: &'s [String]) -> Vec<&'s str> {
        let mut seen = BTreeSet::new();
        selected
            .iter()
            .map(String::as_str)
            .filter(|r| seen.insert(*r) && !self.snapshot.remotes.contains(*r))
            .collect()
    }
}

/// Analyze already-captured listings
pub fn analyze_listings(
    remote_text: &str,
    ref_text: &str,
    protected: &ProtectedBranches,
) -> Result<(Snapshot, Vec<DuplicateMatch>, DeletionPlan), SweepError> {
    let snapshot = parse_snapshot(remote_text, ref_text)?;
    let matches = find_duplicates(&snapshot.branches, protected);
    let plan = DeletionPlan::from_matches(&matches);
    Ok((snapshot, matches, plan))
}

/// Read the refs through the collaborators and build the deletion plan
///
/// `protected_names` extends the always-protected names. Pure apart from the
/// listing calls; nothing is deleted here.
pub fn analyze<L, C>(
    lister: &L,
    current: &C,
    protected_names: &[String],
) -> Result<Analysis, SweepError>
where
    L: RefLister + ?Sized,
    C: CurrentBranchProvider + ?Sized,
{
    let current_branch = current.current_branch()?;
    let remote_text = lister.list_remotes()?;
    let ref_text = lister.list_merged_refs()?;

    let protected =
        ProtectedBranches::new(protected_names.iter().cloned(), current_branch.as_deref());
    let (snapshot, matches, plan) = analyze_listings(&remote_text, &ref_text, &protected)?;

    tracing::debug!(
        "{} branches, {} matches on {} remotes",
        snapshot.branches.len(),
        matches.len(),
        plan.remote_deletions.len()
    );

    Ok(Analysis {
        snapshot,
        current_branch,
        matches,
        plan,
    })
}

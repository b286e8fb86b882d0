//! Ref listing parsing
//!
//! Turns the raw text of `git remote -v` and
//! `git for-each-ref --format '%(refname) %(objectname) %(upstream)'` into a
//! [`Snapshot`] of local and remote-tracking branches.

use std::collections::BTreeSet;

use crate::error::SweepError;
use crate::types::{AmbiguousRemoteMatch, Branch, Snapshot};

const LOCAL_PREFIX: &str = "refs/heads/";
const REMOTE_PREFIX: &str = "refs/remotes/";

/// Parse both listings into a snapshot
pub fn parse_snapshot(remote_text: &str, ref_text: &str) -> Result<Snapshot, SweepError> {
    let remotes = parse_remotes(remote_text);
    let (branches, ambiguities) = parse_refs(ref_text, &remotes)?;
    Ok(Snapshot {
        remotes,
        branches,
        ambiguities,
    })
}

/// Collect remote names: the first field of every non-empty line
pub fn parse_remotes(text: &str) -> BTreeSet<String> {
    text.lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Parse `<ref> <commit> [<upstream>]` lines
///
/// Refs that are neither local branches nor remote-tracking branches of a
/// known remote are skipped. A line with any other field count is an error.
pub fn parse_refs(
    text: &str,
    remotes: &BTreeSet<String>,
) -> Result<(Vec<Branch>, Vec<AmbiguousRemoteMatch>), SweepError> {
    let mut branches = Vec::new();
    let mut ambiguities = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_number = line_num + 1; // 1-indexed

        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let (ref_name, commit, upstream) = match fields.as_slice() {
            [ref_name, commit] => (*ref_name, *commit, None),
            [ref_name, commit, upstream] => (*ref_name, *commit, Some(*upstream)),
            _ => {
                return Err(SweepError::MalformedInput {
                    line_number,
                    token_count: fields.len(),
                    line: line.to_string(),
                });
            }
        };

        let (remote, name) = match resolve_remote(ref_name, remotes) {
            Some(resolved) => {
                if resolved.candidates.len() > 1 {
                    tracing::warn!(
                        "ambiguous remote for {}: {:?}, using {}",
                        ref_name,
                        resolved.candidates,
                        resolved.remote
                    );
                    ambiguities.push(AmbiguousRemoteMatch {
                        ref_name: ref_name.to_string(),
                        candidates: resolved.candidates,
                        chosen: resolved.remote.to_string(),
                    });
                }
                (Some(resolved.remote.to_string()), resolved.name)
            }
            None => match ref_name.strip_prefix(LOCAL_PREFIX) {
                Some(name) if !name.is_empty() => (None, name),
                _ => {
                    tracing::debug!("skipping ref {}", ref_name);
                    continue;
                }
            },
        };

        branches.push(Branch {
            ref_name: ref_name.to_string(),
            name: name.to_string(),
            commit: commit.to_string(),
            remote,
            upstream: upstream.map(str::to_string),
        });
    }

    Ok((branches, ambiguities))
}

/// Remote-tracking ref split into remote and branch name
struct ResolvedRemote<'a> {
    remote: &'a str,
    name: &'a str,
    candidates: Vec<String>,
}

/// Split `refs/remotes/<remote>/<name>` against the known remotes
///
/// Remote names may contain `/`, so `refs/remotes/foo/bar/baz` can be branch
/// `baz` on `foo/bar` or branch `bar/baz` on `foo`. The longest matching
/// remote wins.
fn resolve_remote<'a>(
    ref_name: &'a str,
    remotes: &'a BTreeSet<String>,
) -> Option<ResolvedRemote<'a>> {
    let rest = ref_name.strip_prefix(REMOTE_PREFIX)?;

    let matching: Vec<(&'a str, &'a str)> = remotes
        .iter()
        .filter_map(|remote| {
            let name = rest.strip_prefix(remote.as_str())?.strip_prefix('/')?;
            (!name.is_empty()).then_some((remote.as_str(), name))
        })
        .collect();

    let (remote, name) = matching
        .iter()
        .copied()
        .max_by_key(|(remote, _)| remote.len())?;

    Some(ResolvedRemote {
        remote,
        name,
        candidates: matching.iter().map(|(r, _)| r.to_string()).collect(),
    })
}

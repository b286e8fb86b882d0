//! Integration tests for sweep-core
//!
//! These tests drive the full parse → match → plan → execute pipeline
//! through an in-memory repository.

use std::cell::RefCell;

use sweep_core::{
    CommandRunner, Config, CurrentBranchProvider, Executor, RefLister, RunMode, SweepCommand,
    SweepError, analyze,
};

/// In-memory stand-in for a git repository
struct FakeRepo {
    remotes: String,
    refs: String,
    current: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl FakeRepo {
    fn new(remotes: &str, refs: &str, current: &str) -> Self {
        Self {
            remotes: remotes.to_string(),
            refs: refs.to_string(),
            current: Some(current.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl RefLister for FakeRepo {
    fn list_remotes(&self) -> Result<String, SweepError> {
        Ok(self.remotes.clone())
    }

    fn list_merged_refs(&self) -> Result<String, SweepError> {
        Ok(self.refs.clone())
    }
}

impl CurrentBranchProvider for FakeRepo {
    fn current_branch(&self) -> Result<Option<String>, SweepError> {
        Ok(self.current.clone())
    }
}

impl CommandRunner for FakeRepo {
    fn delete_remote_branches(&self, remote: &str, names: &[String]) -> Result<(), SweepError> {
        self.calls
            .borrow_mut()
            .push(format!("git push -d {} {}", remote, names.join(" ")));
        Ok(())
    }

    fn delete_local_branches(&self, names: &[String]) -> Result<(), SweepError> {
        self.calls
            .borrow_mut()
            .push(format!("git branch -d {}", names.join(" ")));
        Ok(())
    }
}

fn protected() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

fn selected(remotes: &[&str]) -> Vec<String> {
    remotes.iter().map(|r| r.to_string()).collect()
}

const ONE_REMOTE: &str = "origin git@example.com:me/repo.git (fetch)\n\
                          origin git@example.com:me/repo.git (push)\n";

const FEAT_A_REFS: &str = "refs/heads/featA c1\n\
                           refs/remotes/origin/featA c1\n\
                           refs/heads/main c2\n";

#[test]
fn test_live_run_deletes_remote_then_local() {
    let repo = FakeRepo::new(ONE_REMOTE, FEAT_A_REFS, "main");
    let analysis = analyze(&repo, &repo, &protected()).unwrap();

    assert_eq!(analysis.matches.len(), 1);
    assert_eq!(analysis.matches[0].local.name, "featA");
    assert_eq!(analysis.matches[0].remote_name(), "origin");

    let remotes = selected(&["origin"]);
    let mode = RunMode::resolve(&remotes, None);
    assert!(!mode.dry_run);

    let resolved = analysis.plan.resolve(&remotes);
    let report = Executor::new(&repo, mode).execute(&resolved, |_| {});

    assert!(report.is_success());
    assert_eq!(
        *repo.calls.borrow(),
        vec!["git push -d origin featA", "git branch -d featA"]
    );
}

#[test]
fn test_no_remotes_forces_dry_run() {
    let repo = FakeRepo::new(ONE_REMOTE, FEAT_A_REFS, "main");
    let analysis = analyze(&repo, &repo, &protected()).unwrap();

    let remotes: Vec<String> = vec![];
    let mode = RunMode::resolve(&remotes, None);
    assert!(mode.dry_run);
    assert!(mode.forced);

    // The unfiltered plan still shows the candidates
    assert_eq!(analysis.plan.local_candidates, vec!["featA"]);
    assert_eq!(analysis.plan.branches_on("origin"), ["featA".to_string()]);

    let resolved = analysis.plan.resolve(&remotes);
    let report = Executor::new(&repo, mode).execute(&resolved, |_| {});

    assert!(repo.calls.borrow().is_empty());
    assert!(report.commands.is_empty());
    assert!(resolved.withheld_locals.contains("featA"));
}

#[test]
fn test_dry_run_with_remote_reports_both_commands() {
    let repo = FakeRepo::new(ONE_REMOTE, FEAT_A_REFS, "main");
    let analysis = analyze(&repo, &repo, &protected()).unwrap();

    let remotes = selected(&["origin"]);
    let mode = RunMode::resolve(&remotes, Some(true));
    let resolved = analysis.plan.resolve(&remotes);

    let mut reported = Vec::new();
    let report = Executor::new(&repo, mode).execute(&resolved, |cmd| reported.push(cmd.clone()));

    assert!(repo.calls.borrow().is_empty());
    assert_eq!(report.commands, reported);
    assert_eq!(
        reported,
        vec![
            SweepCommand::DeleteRemote {
                remote: "origin".to_string(),
                branches: vec!["featA".to_string()],
            },
            SweepCommand::DeleteLocal {
                branches: vec!["featA".to_string()],
            },
        ]
    );
}

#[test]
fn test_local_only_on_unselected_remote_is_kept() {
    let remotes = "origin a (fetch)\nfork b (fetch)\n";
    let refs = "refs/heads/shared c1\n\
                refs/remotes/origin/shared c1\n\
                refs/remotes/fork/shared c1\n\
                refs/heads/solo c2\n\
                refs/remotes/fork/solo c2\n\
                refs/heads/main c3\n";
    let repo = FakeRepo::new(remotes, refs, "main");
    let analysis = analyze(&repo, &repo, &protected()).unwrap();

    let resolved = analysis.plan.resolve(&selected(&["origin"]));
    let report = Executor::new(&repo, RunMode::live()).execute(&resolved, |_| {});

    assert!(report.is_success());
    // Only origin is cleaned; both locals still have a copy on fork
    assert_eq!(*repo.calls.borrow(), vec!["git push -d origin shared"]);
    assert!(resolved.locals_to_delete.is_empty());
    assert_eq!(resolved.withheld_locals.len(), 2);
}

#[test]
fn test_current_branch_is_protected() {
    let refs = "refs/heads/topic c1\nrefs/remotes/origin/topic c1\n";
    let repo = FakeRepo::new(ONE_REMOTE, refs, "topic");
    let analysis = analyze(&repo, &repo, &protected()).unwrap();

    assert!(analysis.matches.is_empty());
    assert!(analysis.plan.is_empty());
}

#[test]
fn test_planning_twice_is_identical() {
    let repo = FakeRepo::new(ONE_REMOTE, FEAT_A_REFS, "main");
    let first = analyze(&repo, &repo, &protected()).unwrap();
    let second = analyze(&repo, &repo, &protected()).unwrap();

    assert_eq!(first.matches, second.matches);
    assert_eq!(first.plan, second.plan);
    assert_eq!(
        first.plan.resolve(&selected(&["origin"])),
        second.plan.resolve(&selected(&["origin"]))
    );
}

#[test]
fn test_malformed_ref_line_aborts_before_deletion() {
    let refs = "refs/heads/featA c1\nrefs/heads/bad c1 up extra\n";
    let repo = FakeRepo::new(ONE_REMOTE, refs, "main");

    match analyze(&repo, &repo, &protected()) {
        Err(SweepError::MalformedInput {
            line_number, line, ..
        }) => {
            assert_eq!(line_number, 2);
            assert_eq!(line, "refs/heads/bad c1 up extra");
        }
        other => panic!("expected MalformedInput, got {:?}", other),
    }
    assert!(repo.calls.borrow().is_empty());
}

#[test]
fn test_unknown_selected_remote_is_reported() {
    let repo = FakeRepo::new(ONE_REMOTE, FEAT_A_REFS, "main");
    let analysis = analyze(&repo, &repo, &protected()).unwrap();

    let remotes = selected(&["origin", "upstream"]);
    assert_eq!(analysis.unknown_remotes(&remotes), vec!["upstream"]);
}

#[test]
fn test_configured_names_extend_main_and_master() {
    let refs = "refs/heads/main c1\n\
                refs/remotes/origin/main c1\n\
                refs/heads/master c2\n\
                refs/remotes/origin/master c2\n\
                refs/heads/develop c3\n\
                refs/remotes/origin/develop c3\n\
                refs/heads/featA c4\n\
                refs/remotes/origin/featA c4\n";
    let repo = FakeRepo::new(ONE_REMOTE, refs, "topic");

    for content in [
        "[sweep]\nprotected_branches = [\"develop\"]\n",
        "[sweep]\nprotected_branches = []\n",
    ] {
        let config = Config::from_toml(content).unwrap();
        let analysis = analyze(&repo, &repo, &config.sweep.protected_branches).unwrap();
        let names: Vec<&str> = analysis
            .matches
            .iter()
            .map(|m| m.local.name.as_str())
            .collect();

        assert!(!names.contains(&"main"));
        assert!(!names.contains(&"master"));
        assert!(names.contains(&"featA"));
    }
}

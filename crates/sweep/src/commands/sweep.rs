//! Implementation of the sweep run: analyze, print the plan, execute

use std::path::PathBuf;

use anyhow::Context;
use owo_colors::OwoColorize;
use sweep_core::{
    Analysis, Config, ExecutionReport, Executor, GitCli, ResolvedPlan, RunMode, SweepCommand,
    SweepError, analyze,
};

use crate::colors::COLORS;
use crate::output::{JsonIssue, JsonResponse, MatchEntry, SweepData, print_json};

/// Options for one sweep run
#[derive(Debug, Clone, Default)]
pub struct SweepArgs {
    pub remotes: Vec<String>,
    /// `Some` when --dry-run or --no-dry-run was given
    pub dry_run: Option<bool>,
    pub repo: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Run the sweep command
pub fn run_sweep(args: SweepArgs, json_output: bool, quiet: bool) -> anyhow::Result<i32> {
    match sweep(&args, json_output, quiet) {
        Ok(code) => Ok(code),
        Err(e) if json_output => {
            let issue = match e.downcast_ref::<SweepError>() {
                Some(err) => JsonIssue::from(err),
                None => JsonIssue::error("E000", format!("{:#}", e)),
            };
            let data = SweepData {
                selected_remotes: args.remotes.clone(),
                ..Default::default()
            };
            print_json(&JsonResponse::error("sweep", data, vec![issue]))?;
            Ok(exit_code_for(&e))
        }
        Err(e) => Err(e),
    }
}

/// Exit code for an error that escaped the sweep
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<SweepError>()
        .map(SweepError::exit_code)
        .unwrap_or(1)
}

fn sweep(args: &SweepArgs, json_output: bool, quiet: bool) -> anyhow::Result<i32> {
    let config =
        Config::discover(args.config.as_deref()).context("failed to load configuration")?;

    let repo_root = match &args.repo {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    let git = GitCli::new(config.sweep.git.clone(), repo_root);

    let mode = RunMode::resolve(&args.remotes, args.dry_run);
    let analysis = analyze(&git, &git, &config.sweep.protected_branches)?;
    let resolved = analysis.plan.resolve(&args.remotes);
    let issues = collect_warnings(&analysis, &args.remotes, mode);

    let print_human = !json_output && !quiet;
    if print_human {
        for issue in &issues {
            println!("{}", format!("Warning: {}", issue.message).style(COLORS.warning));
        }
        print_plan(&analysis, &resolved, &args.remotes);
    }

    let executor = Executor::new(&git, mode);
    let report = executor.execute(&resolved, |command| {
        if print_human {
            print_command(command, mode);
        }
    });

    if json_output {
        let data = sweep_data(&analysis, &resolved, &report, &args.remotes, mode);
        let mut issues = issues;
        issues.extend(
            report
                .failures
                .iter()
                .map(|f| JsonIssue::error("E002", f.message.clone())),
        );
        let response = if report.is_success() {
            JsonResponse::ok_with_issues("sweep", data, issues)
        } else {
            JsonResponse::error("sweep", data, issues)
        };
        print_json(&response)?;
    } else {
        print_outcome(&report, quiet);
    }

    Ok(if report.is_success() { 0 } else { 1 })
}

/// Warnings for ambiguous refs, unknown remotes and forced dry-run
fn collect_warnings(analysis: &Analysis, selected: &[String], mode: RunMode) -> Vec<JsonIssue> {
    let mut issues = Vec::new();

    if mode.forced {
        issues.push(JsonIssue::warning(
            "W003",
            "no remote specified, using dry run mode",
        ));
    }

    for remote in analysis.unknown_remotes(selected) {
        tracing::warn!("remote {} is not configured", remote);
        issues.push(JsonIssue::warning(
            "W002",
            format!("remote `{}` is not configured in this repository", remote),
        ));
    }

    for ambiguity in &analysis.snapshot.ambiguities {
        issues.push(JsonIssue::warning(
            "W001",
            format!(
                "{} matches remotes {}; using `{}`",
                ambiguity.ref_name,
                ambiguity.candidates.join(", "),
                ambiguity.chosen
            ),
        ));
    }

    issues
}

/// Print the matches and candidate lists; live runs show the same plan as dry-runs
fn print_plan(analysis: &Analysis, resolved: &ResolvedPlan, selected: &[String]) {
    if analysis.matches.is_empty() {
        println!("No merged branches to sweep");
        return;
    }

    for m in &analysis.matches {
        println!("{}", m);
    }

    println!();
    println!(
        "locally deletable branches: {}",
        analysis.plan.local_candidates.join(", ")
    );
    println!("remote deletable branches:");
    for deletion in &analysis.plan.remote_deletions {
        println!("  {}: {}", deletion.remote, deletion.branches.join(", "));
    }

    for name in &resolved.withheld_locals {
        let holders: Vec<&str> = analysis
            .plan
            .remote_deletions
            .iter()
            .filter(|d| !selected.contains(&d.remote) && d.branches.contains(name))
            .map(|d| d.remote.as_str())
            .collect();
        println!(
            "{}",
            format!(
                "keeping local branch {}: still on {}",
                name,
                holders.join(", ")
            )
            .style(COLORS.kept)
        );
    }
    println!();
}

fn print_command(command: &SweepCommand, mode: RunMode) {
    if mode.dry_run {
        println!("{}", format!("would run: {}", command).style(COLORS.planned));
    } else {
        println!("{}", command.to_string().style(COLORS.command));
    }
}

fn print_outcome(report: &ExecutionReport, quiet: bool) {
    for failure in &report.failures {
        eprintln!(
            "{} {}",
            "error:".style(COLORS.failed),
            failure.message
        );
    }
    if report.locals_skipped {
        eprintln!("local branches kept because a remote deletion failed");
    }

    if quiet || report.dry_run {
        return;
    }

    let remote_count: usize = report.remote_deleted.iter().map(|d| d.branches.len()).sum();
    if remote_count > 0 || !report.locals_deleted.is_empty() {
        println!(
            "{}",
            format!(
                "Deleted {} remote and {} local branch(es)",
                remote_count,
                report.locals_deleted.len()
            )
            .style(COLORS.deleted)
        );
    }
}

fn sweep_data(
    analysis: &Analysis,
    resolved: &ResolvedPlan,
    report: &ExecutionReport,
    selected: &[String],
    mode: RunMode,
) -> SweepData {
    SweepData {
        current_branch: analysis.current_branch.clone(),
        remotes: analysis.snapshot.remotes.iter().cloned().collect(),
        selected_remotes: selected.to_vec(),
        dry_run: mode.dry_run,
        forced_dry_run: mode.forced,
        matches: analysis.matches.iter().map(MatchEntry::from).collect(),
        remote_candidates: analysis.plan.remote_deletions.clone(),
        local_candidates: analysis.plan.local_candidates.clone(),
        locals_to_delete: resolved.locals_to_delete.iter().cloned().collect(),
        withheld_locals: resolved.withheld_locals.iter().cloned().collect(),
        commands: report.commands.iter().map(ToString::to_string).collect(),
        failures: report.failures.clone(),
    }
}

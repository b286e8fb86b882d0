//! Plan execution
//!
//! Issues one batched deletion per selected remote, then one batched local
//! deletion. Under dry-run the commands are only reported.

use serde::{Deserialize, Serialize};

use crate::git::CommandRunner;
use crate::planner::ResolvedPlan;
use crate::types::{RemoteDeletion, SweepCommand};

/// Whether commands are executed or only reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMode {
    pub dry_run: bool,
    /// Dry-run was imposed because no remote was selected
    pub forced: bool,
}

impl RunMode {
    /// Decide the run mode from the selected remotes and the `--dry-run` /
    /// `--no-dry-run` flag (`None` when neither was given)
    ///
    /// With no remotes selected, anything short of an explicit `--no-dry-run`
    /// becomes a forced dry-run.
    pub fn resolve(selected: &[String], dry_run_flag: Option<bool>) -> Self {
        match dry_run_flag {
            Some(dry_run) => Self {
                dry_run,
                forced: false,
            },
            None if selected.is_empty() => {
                tracing::warn!("no remote specified, using dry run mode");
                Self {
                    dry_run: true,
                    forced: true,
                }
            }
            None => Self {
                dry_run: false,
                forced: false,
            },
        }
    }

    pub fn live() -> Self {
        Self {
            dry_run: false,
            forced: false,
        }
    }

    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            forced: false,
        }
    }
}

/// A command the runner rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFailure {
    pub command: SweepCommand,
    pub message: String,
}

/// What an execution did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub dry_run: bool,
    /// Commands issued (or reported under dry-run), in order
    pub commands: Vec<SweepCommand>,
    /// Remote batches that completed
    pub remote_deleted: Vec<RemoteDeletion>,
    /// Local branches deleted
    pub locals_deleted: Vec<String>,
    /// Local deletion was skipped because a remote batch failed
    pub locals_skipped: bool,
    pub failures: Vec<CommandFailure>,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs a resolved plan through a [`CommandRunner`]
pub struct Executor<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    mode: RunMode,
}

impl<'a, R: CommandRunner + ?Sized> Executor<'a, R> {
    pub fn new(runner: &'a R, mode: RunMode) -> Self {
        Self { runner, mode }
    }

    /// Execute the plan, calling `on_command` before each command is issued
    ///
    /// A failed remote batch does not stop the other remote batches, but it
    /// does skip the local deletion. Nothing already deleted is rolled back.
    pub fn execute<F>(&self, plan: &ResolvedPlan, mut on_command: F) -> ExecutionReport
    where
        F: FnMut(&SweepCommand),
    {
        let mut report = ExecutionReport {
            dry_run: self.mode.dry_run,
            ..Default::default()
        };

        for batch in &plan.remote_batches {
            let command = SweepCommand::DeleteRemote {
                remote: batch.remote.clone(),
                branches: batch.branches.clone(),
            };
            on_command(&command);
            report.commands.push(command.clone());

            if self.mode.dry_run {
                continue;
            }

            tracing::info!("submitting {}", command);
            match self
                .runner
                .delete_remote_branches(&batch.remote, &batch.branches)
            {
                Ok(()) => report.remote_deleted.push(batch.clone()),
                Err(e) => {
                    tracing::warn!("{} failed: {}", command, e);
                    report.failures.push(CommandFailure {
                        command,
                        message: e.to_string(),
                    });
                }
            }
        }

        if plan.locals_to_delete.is_empty() {
            return report;
        }

        if !report.failures.is_empty() {
            tracing::warn!("remote deletion failed, keeping local branches");
            report.locals_skipped = true;
            return report;
        }

        let branches: Vec<String> = plan.locals_to_delete.iter().cloned().collect();
        let command = SweepCommand::DeleteLocal {
            branches: branches.clone(),
        };
        on_command(&command);
        report.commands.push(command.clone());

        if self.mode.dry_run {
            return report;
        }

        tracing::info!("submitting {}", command);
        match self.runner.delete_local_branches(&branches) {
            Ok(()) => report.locals_deleted = branches,
            Err(e) => {
                tracing::warn!("{} failed: {}", command, e);
                report.failures.push(CommandFailure {
                    command,
                    message: e.to_string(),
                });
            }
        }

        report
    }
}

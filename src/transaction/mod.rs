//! Plan/commit/rollback transaction over external commands.
//!
//! The [`Committer`] keeps two FIFO queues: the forward plan and the
//! compensating rollback plan. `commit` drains the forward plan through an
//! [`Executor`] and stops at the first failure; `rollback` replays every
//! compensating command, recording failures instead of raising them.

mod command;
mod executor;
mod report;

pub use command::{Command, shell_escape};
pub use executor::{Executor, ProcessExecutor};
pub use report::{RollbackOutcome, RollbackReport, RollbackStep};

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::cli::OutputManager;
use crate::error::ExecError;

/// Sequential committer for planned external commands
#[derive(Debug)]
pub struct Committer<E: Executor> {
    executor: E,
    workdir: PathBuf,
    pretend: bool,
    output: OutputManager,
    plan: VecDeque<Command>,
    rollback: Vec<Command>,
}

impl<E: Executor> Committer<E> {
    /// Create a committer running commands in `workdir`
    pub fn new(executor: E, workdir: impl Into<PathBuf>, pretend: bool, output: OutputManager) -> Self {
        Self {
            executor,
            workdir: workdir.into(),
            pretend,
            output,
            plan: VecDeque::new(),
            rollback: Vec::new(),
        }
    }

    /// Plan a forward command from raw tokens; absent tokens are dropped
    pub fn plan<I, T>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<String>,
    {
        if let Some(command) = Command::from_tokens(tokens) {
            self.plan_command(command, false);
        }
    }

    /// Plan a rollback command from raw tokens; absent tokens are dropped
    pub fn plan_rollback<I, T>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<String>,
    {
        if let Some(command) = Command::from_tokens(tokens) {
            self.plan_command(command, true);
        }
    }

    /// Append a structured command to the forward or rollback plan
    pub fn plan_command(&mut self, command: Command, is_rollback: bool) {
        log::trace!(
            "planned {}: {}",
            if is_rollback { "rollback" } else { "forward" },
            command
        );
        if is_rollback {
            self.rollback.push(command);
        } else {
            self.plan.push_back(command);
        }
    }

    /// Execute the forward plan in order.
    ///
    /// Stops at and returns the first failure. In pretend mode the plan and
    /// the rollback plan are printed and nothing runs.
    pub fn commit(&mut self) -> Result<(), ExecError> {
        if self.pretend {
            for line in self.pretend_listing() {
                self.output.listing(&line);
            }
            self.plan.clear();
            return Ok(());
        }

        while let Some(command) = self.plan.pop_front() {
            log::debug!("running: {}", command);
            self.output.verbose(&format!("$ {}", command));
            self.executor.run(&command, &self.workdir)?;
        }
        Ok(())
    }

    /// Replay the rollback plan, never failing.
    ///
    /// Forward commands still queued are reported as skipped and discarded.
    pub fn rollback(&mut self) -> RollbackReport {
        let skipped: Vec<Command> = self.plan.drain(..).collect();
        if !skipped.is_empty() {
            self.output
                .warn(&format!("{} planned command(s) were not executed:", skipped.len()));
            for command in &skipped {
                self.output.indent(&command.render());
            }
        }

        let mut steps = Vec::with_capacity(self.rollback.len());
        for command in std::mem::take(&mut self.rollback) {
            let outcome = if self.pretend {
                self.output.listing(&format!("rollback: {}", command));
                RollbackOutcome::Pretended
            } else {
                self.output.verbose(&format!("$ {}", command));
                match self.executor.run(&command, &self.workdir) {
                    Ok(()) => RollbackOutcome::Succeeded,
                    Err(e) => {
                        log::warn!("rollback command failed: {}: {}", command, e);
                        self.output.warn(&format!("Rollback step failed: {}", e));
                        RollbackOutcome::Failed(e.to_string())
                    }
                }
            };
            steps.push(RollbackStep { command, outcome });
        }

        RollbackReport { skipped, steps }
    }

    /// Lines printed by a pretend commit: forward plan, then rollback plan
    pub fn pretend_listing(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.plan.iter().map(Command::render).collect();
        if !self.rollback.is_empty() {
            lines.push("# rollback plan:".to_string());
            lines.extend(self.rollback.iter().map(|c| format!("#   {}", c)));
        }
        lines
    }

    /// Forward commands not yet executed
    pub fn pending(&self) -> impl Iterator<Item = &Command> {
        self.plan.iter()
    }

    /// Rollback commands registered so far
    pub fn rollback_plan(&self) -> &[Command] {
        &self.rollback
    }

    /// Run a read-only query, capturing stdout
    pub fn query(&self, command: &Command) -> Result<String, ExecError> {
        log::debug!("querying: {}", command);
        self.executor.capture(command, &self.workdir)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingExecutor;
    use super::*;

    fn quiet() -> OutputManager {
        OutputManager::new(false, true)
    }

    fn tokens(line: &str) -> Vec<Option<String>> {
        line.split_whitespace().map(|t| Some(t.to_string())).collect()
    }

    #[test]
    fn test_commit_runs_each_command_once_in_order() {
        let exec = RecordingExecutor::new();
        let mut committer = Committer::new(&exec, ".", false, quiet());
        committer.plan(tokens("git checkout f39"));
        committer.plan(tokens("fedpkg build"));
        committer.plan(tokens("git checkout main"));
        committer.plan_rollback(tokens("git checkout main"));

        committer.commit().expect("all commands succeed");

        assert_eq!(
            exec.runs(),
            ["git checkout f39", "fedpkg build", "git checkout main"]
        );
        assert_eq!(committer.pending().count(), 0);
        assert_eq!(committer.rollback_plan().len(), 1);
    }

    #[test]
    fn test_failure_stops_commit_and_rollback_attempts_everything() {
        let exec = RecordingExecutor::new()
            .failing_on("fedpkg build")
            .failing_on("git checkout f40");
        let mut committer = Committer::new(&exec, ".", false, quiet());
        committer.plan(tokens("git checkout -b private-f40-rh1"));
        committer.plan(tokens("fedpkg build"));
        committer.plan(tokens("git push --force --set-upstream origin private-f40-rh1"));
        committer.plan(tokens("git checkout main"));
        committer.plan_rollback(tokens("git checkout f40"));
        committer.plan_rollback(tokens("git branch --delete --force private-f40-rh1"));
        committer.plan_rollback(tokens("git checkout main"));

        let err = committer.commit().expect_err("build fails");
        assert!(err.to_string().contains("fedpkg build"));

        let report = committer.rollback();
        assert_eq!(
            exec.runs(),
            [
                "git checkout -b private-f40-rh1",
                "fedpkg build",
                "git checkout f40",
                "git branch --delete --force private-f40-rh1",
                "git checkout main",
            ]
        );
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.steps.len(), 3);
        assert!(matches!(report.steps[0].outcome, RollbackOutcome::Failed(_)));
        assert_eq!(report.steps[1].outcome, RollbackOutcome::Succeeded);
        assert_eq!(report.steps[2].outcome, RollbackOutcome::Succeeded);
        assert!(!report.is_clean());
        assert!(committer.rollback_plan().is_empty());
    }

    #[test]
    fn test_rollback_is_not_touched_on_success() {
        let exec = RecordingExecutor::new();
        let mut committer = Committer::new(&exec, ".", false, quiet());
        committer.plan(tokens("fedpkg build"));
        committer.plan_rollback(tokens("git checkout main"));
        committer.commit().expect("succeeds");
        assert_eq!(exec.runs(), ["fedpkg build"]);
    }

    #[test]
    fn test_plan_filters_absent_tokens_and_skips_empty() {
        let exec = RecordingExecutor::new();
        let mut committer = Committer::new(&exec, ".", false, quiet());
        committer.plan([Some("fedpkg"), None, Some("build")]);
        committer.plan([None::<&str>, None]);
        let pending: Vec<String> = committer.pending().map(Command::render).collect();
        assert_eq!(pending, ["fedpkg build"]);
    }

    #[test]
    fn test_pretend_spawns_nothing() {
        let exec = RecordingExecutor::new();
        let mut committer = Committer::new(&exec, ".", true, quiet());
        committer.plan(tokens("git checkout master"));
        committer.plan([Some("bodhi"), Some("--notes=two words")]);
        committer.plan_rollback(tokens("git checkout main"));

        let listing = committer.pretend_listing();
        assert_eq!(
            listing,
            [
                "git checkout master",
                "bodhi '--notes=two words'",
                "# rollback plan:",
                "#   git checkout main",
            ]
        );

        committer.commit().expect("pretend never fails");
        let report = committer.rollback();
        assert!(exec.runs().is_empty());
        assert_eq!(report.steps[0].outcome, RollbackOutcome::Pretended);
    }

    #[test]
    fn test_early_commit_shares_rollback_queue() {
        let exec = RecordingExecutor::new().failing_on("fedpkg build");
        let mut committer = Committer::new(&exec, ".", false, quiet());
        committer.plan(tokens("rpmdev-bumpspec foo.spec"));
        committer.plan_rollback(tokens("git checkout main"));
        committer.commit().expect("first transaction");

        committer.plan(tokens("fedpkg build"));
        assert!(committer.commit().is_err());
        let report = committer.rollback();

        assert!(report.skipped.is_empty());
        assert_eq!(report.steps.len(), 1);
        assert_eq!(
            exec.runs(),
            ["rpmdev-bumpspec foo.spec", "fedpkg build", "git checkout main"]
        );
    }
}

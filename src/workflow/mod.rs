//! Workflow driver: turns run options into a plan and commits it.
//!
//! Planning walks the selected branches in order and appends the requested
//! lifecycle steps for each one. The plan is committed once at the end; an
//! explicit version bump commits early so the rewritten specfile is on disk
//! for the steps that read it, and update steps commit the checkout before
//! querying the package version. Any failure after a commit was attempted
//! replays the shared rollback plan, which always ends on the original branch.

mod branch;
mod steps;

pub use branch::{
    BranchSelection, DEFAULT_BRANCH, DEFAULT_REMOTE, Session, branch_name, private_branch_name,
};
pub use steps::ToolCommands;

use std::path::{Path, PathBuf};

use crate::cli::OutputManager;
use crate::error::{ConfigError, Result, WorkflowError};
use crate::options::RunOptions;
use crate::specfile::{self, Verrel};
use crate::transaction::{Command, Committer, Executor, RollbackReport};

/// Query the branch checked out in `workdir`
pub fn detect_current_branch<E: Executor>(
    executor: &E,
    tools: &ToolCommands,
    workdir: &Path,
) -> Result<String> {
    let output = executor
        .capture(&tools.current_branch(), workdir)
        .map_err(|e| ConfigError::UnknownCurrentBranch {
            reason: e.to_string(),
        })?;
    let branch = output.trim();
    if branch.is_empty() {
        return Err(ConfigError::UnknownCurrentBranch {
            reason: "git printed no branch name".to_string(),
        }
        .into());
    }
    Ok(branch.to_string())
}

/// Plans and commits the workflow for one package checkout
#[derive(Debug)]
pub struct WorkflowDriver<'a, E: Executor> {
    options: &'a RunOptions,
    tools: ToolCommands,
    session: Session,
    output: OutputManager,
    committer: Committer<E>,
    specfile: Option<PathBuf>,
    commit_attempted: bool,
    restore_planned: bool,
    rollback_report: Option<RollbackReport>,
}

impl<'a, E: Executor> WorkflowDriver<'a, E> {
    /// Create a driver for `session`
    pub fn new(options: &'a RunOptions, session: Session, executor: E, output: OutputManager) -> Self {
        let committer = Committer::new(
            executor,
            session.workdir.clone(),
            options.pretend,
            output.clone(),
        );
        Self {
            options,
            tools: ToolCommands::new(&options.fedpkg, options.dist.clone()),
            session,
            output,
            committer,
            specfile: None,
            commit_attempted: false,
            restore_planned: false,
            rollback_report: None,
        }
    }

    /// Plan every branch, then commit; roll back on failure.
    ///
    /// Once a commit was attempted, a failure replays the rollback plan and
    /// is returned as [`WorkflowError::RolledBack`]. Errors raised before any
    /// commit leave nothing to roll back and are returned unchanged.
    pub fn run(&mut self) -> Result<()> {
        let err = match self.plan_all().and_then(|()| self.commit()) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        if !self.commit_attempted {
            log::debug!("failure before any command ran, nothing to roll back");
            return Err(err);
        }

        self.output.warn(&format!("Rolling back after failure: {}", err));
        self.plan_restore();
        let report = self.committer.rollback();
        if report.is_clean() {
            self.output.info(&report.format_result());
        } else {
            self.output.warn(&report.format_result());
        }
        self.rollback_report = Some(report);

        if self.options.pretend {
            return Err(err);
        }
        Err(WorkflowError::RolledBack {
            source: Box::new(err),
        }
        .into())
    }

    /// Report of the rollback pass, if one ran
    pub fn rollback_report(&self) -> Option<&RollbackReport> {
        self.rollback_report.as_ref()
    }

    /// The underlying committer
    pub fn committer(&self) -> &Committer<E> {
        &self.committer
    }

    fn commit(&mut self) -> Result<()> {
        self.commit_attempted = true;
        self.committer.commit()?;
        Ok(())
    }

    fn plan_all(&mut self) -> Result<()> {
        if self.options.branches.is_empty() {
            return Err(ConfigError::NoBranchSelected.into());
        }

        let options = self.options;
        for branch in options.branches.iter() {
            self.plan_branch(branch)?;
        }

        if !self.options.stay {
            let original = self.session.original_branch.clone().ok_or_else(|| {
                ConfigError::UnknownCurrentBranch {
                    reason: "original branch was not recorded".to_string(),
                }
            })?;
            self.forward(self.tools.checkout(&original));
            self.plan_restore();
        }
        Ok(())
    }

    /// Register the switch back to the original branch as the last rollback
    /// step, once
    fn plan_restore(&mut self) {
        if self.options.stay || self.restore_planned {
            return;
        }
        if let Some(original) = self.session.original_branch.clone() {
            self.undo(self.tools.checkout(&original));
            self.restore_planned = true;
        }
    }

    fn plan_branch(&mut self, branch: Option<&str>) -> Result<()> {
        let options = self.options;
        let base = branch_name(branch).to_string();
        self.output.progress(&format!("Planning branch {}", base));

        self.forward(self.tools.checkout(&base));
        let mut current = base.clone();
        let needs_verrel = (options.update && branch.is_some()) || options.stable;
        let mut verrel = Verrel::Unavailable;

        if options.private_branch {
            let bug = options.rhbug.as_deref().ok_or(ConfigError::MissingBugId)?;
            let private = private_branch_name(&base, bug);
            if self.branch_exists(&private) {
                return Err(ConfigError::PrivateBranchExists { branch: private }.into());
            }
            self.forward(self.tools.checkout_new(&private));
            self.undo(self.tools.checkout(&base));
            self.undo(self.tools.delete_branch(&private));
            current = private;
        }

        if let Some(bump) = &options.bump {
            let specfile = self.specfile()?;
            let version = bump.version.as_deref();
            let comment = options.comment.clone().unwrap_or_else(|| {
                specfile::changelog_comment(version, options.private_branch, options.rhbug.as_deref())
            });
            self.forward(self.tools.bumpspec(version, &comment, &specfile));

            if options.private_branch && version.is_none()
                && let Some(bug) = options.rhbug.as_deref()
            {
                let expr = specfile::release_qualifier_expr(bug);
                self.forward(self.tools.edit_specfile(&expr, &specfile));
            }

            // Later steps read the rewritten specfile from disk, and the
            // update steps need the bumped name-version-release.
            if version.is_some() || needs_verrel {
                self.commit()?;
                if version.is_some() {
                    self.plan_sources(&specfile);
                }
                if needs_verrel {
                    verrel = self.query_verrel(branch);
                }
            }
        } else if needs_verrel {
            // verrel reads the specfile of the checked-out branch
            self.commit()?;
            verrel = self.query_verrel(branch);
        }

        if options.scratch_build {
            self.forward(self.tools.scratch_build());
        }

        if options.commit {
            self.forward(self.tools.commit());
        }

        if options.merge {
            if branch.is_some() {
                self.forward(self.tools.merge_default());
            } else {
                self.output
                    .warn(&format!("Skipping merge: {} cannot merge into itself", base));
            }
        }

        if options.push {
            self.forward(self.tools.push(&current));
        }

        if options.build {
            self.forward(self.tools.build());
        }

        if options.update {
            if branch.is_some() {
                let verrel = Self::require_verrel(&verrel, &base, "update")?;
                let notes = options.update_notes();
                self.forward(self.tools.update_new(
                    options.update_type,
                    options.rhbug.as_deref(),
                    &notes,
                    &verrel,
                ));
            } else {
                self.output
                    .warn(&format!("Skipping update: no updates are filed for {}", base));
            }
        }

        if options.stable {
            let verrel = Self::require_verrel(&verrel, &base, "stable")?;
            self.forward(self.tools.update_stable(&verrel));
        }

        Ok(())
    }

    fn plan_sources(&mut self, specfile: &Path) {
        let listing = self.committer.query(&self.tools.list_sources(specfile));
        self.forward(self.tools.download_sources(specfile));
        match listing {
            Ok(listing) => {
                let files = specfile::parse_source_listing(&listing);
                if !files.is_empty() {
                    self.forward(self.tools.new_sources(&files));
                }
            }
            Err(e) => self
                .output
                .warn(&format!("Could not list sources, not uploading new sources: {}", e)),
        }
    }

    fn query_verrel(&self, branch: Option<&str>) -> Verrel {
        match self.committer.query(&self.tools.verrel(branch)) {
            Ok(output) => Verrel::parse(&output),
            Err(e) => {
                self.output.warn(&format!(
                    "Could not query package version on {}: {}",
                    branch_name(branch),
                    e
                ));
                Verrel::Unavailable
            }
        }
    }

    fn require_verrel(verrel: &Verrel, branch: &str, step: &str) -> Result<String> {
        verrel.as_known().map(str::to_string).ok_or_else(|| {
            WorkflowError::VerrelUnavailable {
                branch: branch.to_string(),
                step: step.to_string(),
            }
            .into()
        })
    }

    fn branch_exists(&self, branch: &str) -> bool {
        self.committer.query(&self.tools.branch_exists(branch)).is_ok()
    }

    fn specfile(&mut self) -> Result<PathBuf> {
        if let Some(path) = &self.specfile {
            return Ok(path.clone());
        }
        let path = specfile::find_specfile(&self.session.workdir)?;
        self.output.verbose(&format!("Using specfile {}", path.display()));
        self.specfile = Some(path.clone());
        Ok(path)
    }

    fn forward(&mut self, command: Command) {
        self.committer.plan_command(command, false);
    }

    fn undo(&mut self, command: Command) {
        self.committer.plan_command(command, true);
    }
}

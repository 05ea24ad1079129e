//! Run configuration captured once at startup.

use std::path::PathBuf;

use crate::workflow::BranchSelection;

/// Type of a Bodhi update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UpdateType {
    /// New upstream release or feature work
    Enhancement,
    /// Bug fixes only
    #[default]
    Bugfix,
    /// Security fixes
    Security,
}

impl UpdateType {
    /// Name accepted by `bodhi updates new --type`
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Enhancement => "enhancement",
            UpdateType::Bugfix => "bugfix",
            UpdateType::Security => "security",
        }
    }

    /// Update notes used when no --comment was given
    pub fn default_notes(&self) -> &'static str {
        match self {
            UpdateType::Enhancement => "Update to the latest upstream release",
            UpdateType::Bugfix => "Bug fix update",
            UpdateType::Security => "Security fix update",
        }
    }
}

/// Requested specfile bump
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BumpRequest {
    /// Explicit new version; `None` bumps the release only
    pub version: Option<String>,
}

/// Immutable options for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Print the plan instead of executing it
    pub pretend: bool,
    /// Suppress informational output
    pub quiet: bool,
    /// Echo every executed command
    pub verbose: bool,
    /// Packaging helper program
    pub fedpkg: String,
    /// Packages to process; empty means the current directory
    pub packages: Vec<String>,
    /// Directory holding one checkout per package
    pub packages_dir: Option<PathBuf>,
    /// Branches to work on, in order
    pub branches: BranchSelection,
    /// Red Hat bugzilla id
    pub rhbug: Option<String>,
    /// Release override passed to the packaging helper
    pub dist: Option<String>,
    /// Work on a private branch derived from the bug id
    pub private_branch: bool,
    /// Bump the specfile
    pub bump: Option<BumpRequest>,
    /// Run a scratch build from an SRPM
    pub scratch_build: bool,
    /// Commit pending changes with the changelog as message
    pub commit: bool,
    /// Fast-forward merge the default branch
    pub merge: bool,
    /// Force-push the current branch
    pub push: bool,
    /// Run a build
    pub build: bool,
    /// File an update
    pub update: bool,
    /// Request stabilization of the update
    pub stable: bool,
    /// Do not switch back to the original branch at the end
    pub stay: bool,
    /// Update type for --update
    pub update_type: UpdateType,
    /// Changelog and update notes text
    pub comment: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            pretend: false,
            quiet: false,
            verbose: false,
            fedpkg: "fedpkg".to_string(),
            packages: Vec::new(),
            packages_dir: None,
            branches: BranchSelection::default(),
            rhbug: None,
            dist: None,
            private_branch: false,
            bump: None,
            scratch_build: false,
            commit: false,
            merge: false,
            push: false,
            build: false,
            update: false,
            stable: false,
            stay: false,
            update_type: UpdateType::default(),
            comment: None,
        }
    }
}

impl RunOptions {
    /// Notes for `bodhi updates new`
    pub fn update_notes(&self) -> String {
        self.comment
            .clone()
            .unwrap_or_else(|| self.update_type.default_notes().to_string())
    }
}

//! Command line argument parsing and validation.
//!
//! Flags select which lifecycle steps run; everything is captured once into
//! an immutable [`RunOptions`].

use clap::Parser;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::options::{BumpRequest, RunOptions, UpdateType};
use crate::workflow::BranchSelection;

/// Batch fedpkg operations across branches with rollback
#[derive(Parser, Debug)]
#[command(
    name = "fedflow",
    version,
    about = "Batch fedpkg operations across branches with all-or-nothing rollback",
    long_about = "Plan checkout, bump, build, commit, push and update steps for one or more
branches of a package repository, then run them in order. If any step fails,
the compensating commands registered so far are replayed.

Usage:
  fedflow --master --push
  fedflow --branches=f39,f40 --merge --push --build --update
  fedflow --branches=f40 --private-branch --rhbug=123456 --bump --scratch-build
  fedflow -p --packages=python-foo,python-bar --master --bump=1.2 --commit"
)]
pub struct Args {
    /// Print the commands instead of running them
    #[arg(short, long)]
    pub pretend: bool,

    /// Suppress informational output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Echo every command as it runs
    #[arg(short, long)]
    pub verbose: bool,

    /// Packaging helper to invoke
    #[arg(long, env = "FEDFLOW_FEDPKG", default_value = "fedpkg", value_name = "PATH")]
    pub fedpkg: String,

    /// Packages to process, each in its own checkout under the packages directory
    #[arg(long, value_delimiter = ',', value_name = "LIST")]
    pub packages: Vec<String>,

    /// Directory holding package checkouts [default: ~/fedora-scm]
    #[arg(long, env = "FEDFLOW_PACKAGES_DIR", value_name = "DIR")]
    pub packages_dir: Option<PathBuf>,

    /// Work on the default branch
    #[arg(short, long)]
    pub master: bool,

    /// Release branches to work on
    #[arg(long, value_delimiter = ',', value_name = "LIST")]
    pub branches: Vec<String>,

    /// Red Hat bugzilla id for changelogs, private branches and updates
    #[arg(long, value_name = "ID")]
    pub rhbug: Option<String>,

    /// Release passed to fedpkg as --release
    #[arg(long, value_name = "NAME")]
    pub dist: Option<String>,

    /// Create private-<branch>-rh<bug> and work there
    #[arg(long)]
    pub private_branch: bool,

    /// Bump the release, or set a new version with --bump=<version>
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "",
        value_name = "VERSION"
    )]
    pub bump: Option<String>,

    /// Scratch build from a locally built SRPM
    #[arg(long)]
    pub scratch_build: bool,

    /// Commit pending changes using the changelog as message
    #[arg(long)]
    pub commit: bool,

    /// Fast-forward merge the default branch
    #[arg(long)]
    pub merge: bool,

    /// Force-push the current branch to origin
    #[arg(long)]
    pub push: bool,

    /// Build in koji
    #[arg(long)]
    pub build: bool,

    /// File a Bodhi update
    #[arg(long)]
    pub update: bool,

    /// Request the update to be pushed to stable
    #[arg(long)]
    pub stable: bool,

    /// Stay on the last branch instead of switching back
    #[arg(long)]
    pub stay: bool,

    /// Update type
    #[arg(long = "type", value_enum, default_value_t = UpdateType::Bugfix)]
    pub update_type: UpdateType,

    /// Changelog entry and update notes
    #[arg(long, value_name = "TEXT")]
    pub comment: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments and capture them as run options
    pub fn to_run_options(&self) -> Result<RunOptions, ConfigError> {
        let branches = BranchSelection::from_flags(self.master, &self.branches);
        if branches.is_empty() {
            return Err(ConfigError::NoBranchSelected);
        }

        if let Some(bug) = &self.rhbug
            && (bug.is_empty() || !bug.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(ConfigError::InvalidArguments {
                reason: format!("--rhbug must be a numeric bug id, got '{}'", bug),
            });
        }

        if let Some(package) = self
            .packages
            .iter()
            .find(|p| p.trim().is_empty() || p.contains('/'))
        {
            return Err(ConfigError::InvalidArguments {
                reason: format!("invalid package name '{}'", package),
            });
        }

        if self.private_branch && self.rhbug.is_none() {
            return Err(ConfigError::MissingBugId);
        }

        // Commands run inside the package checkout, not the invocation directory
        let fedpkg = if self.fedpkg.contains(std::path::is_separator) {
            std::path::absolute(&self.fedpkg)
                .map_err(|e| ConfigError::InvalidArguments {
                    reason: format!("cannot resolve --fedpkg={}: {}", self.fedpkg, e),
                })?
                .display()
                .to_string()
        } else {
            self.fedpkg.clone()
        };

        let bump = self.bump.as_ref().map(|version| BumpRequest {
            version: Some(version.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        });

        Ok(RunOptions {
            pretend: self.pretend,
            quiet: self.quiet,
            verbose: self.verbose,
            fedpkg,
            packages: self.packages.iter().map(|p| p.trim().to_string()).collect(),
            packages_dir: self.packages_dir.clone(),
            branches,
            rhbug: self.rhbug.clone(),
            dist: self.dist.clone(),
            private_branch: self.private_branch,
            bump,
            scratch_build: self.scratch_build,
            commit: self.commit,
            merge: self.merge,
            push: self.push,
            build: self.build,
            update: self.update,
            stable: self.stable,
            stay: self.stay,
            update_type: self.update_type,
            comment: self.comment.clone(),
        })
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        self.output.println(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message);
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}

//! Error types for fedflow operations.
//!
//! Every error carries an actionable message; `FlowError::recovery_suggestions`
//! turns the common ones into remediation hints for the terminal.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fedflow operations
pub type Result<T> = std::result::Result<T, FlowError>;

/// Main error type for all fedflow operations
#[derive(Error, Debug)]
pub enum FlowError {
    /// Invalid or incomplete run configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External command failures
    #[error("Execution error: {0}")]
    Exec(#[from] ExecError),

    /// Specfile and package directory errors
    #[error("Specfile error: {0}")]
    Specfile(#[from] SpecfileError),

    /// Workflow planning errors
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors, detected before any command is executed
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither --master nor --branches was given
    #[error("No branch selected. Use --master and/or --branches=<list>.")]
    NoBranchSelected,

    /// A private branch needs a bug id to derive its name
    #[error("--private-branch requires --rhbug=<id>")]
    MissingBugId,

    /// The private branch for this bug already exists
    #[error("Branch '{branch}' already exists")]
    PrivateBranchExists {
        /// Existing branch name
        branch: String,
    },

    /// The original branch could not be determined for switching back
    #[error("Could not determine the current branch: {reason}")]
    UnknownCurrentBranch {
        /// Why detection failed
        reason: String,
    },

    /// The home directory could not be located for the packages directory
    #[error("Could not locate the home directory for the packages directory")]
    NoHomeDirectory,

    /// Invalid argument value
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

/// Failures of a single external command
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program could not be found or spawned
    #[error("Failed to launch '{command}': {reason}")]
    LaunchFailed {
        /// Rendered command line
        command: String,
        /// Reason for the error
        reason: String,
    },

    /// The program ran and exited unsuccessfully
    #[error(
        "Command '{command}' failed with {status}{}",
        .stderr.as_deref().map(|e| format!(": {e}")).unwrap_or_default()
    )]
    NonZeroExit {
        /// Rendered command line
        command: String,
        /// Exit status description
        status: String,
        /// Captured stderr, if any
        stderr: Option<String>,
    },

    /// Captured output was not valid UTF-8
    #[error("Command '{command}' produced non-UTF-8 output")]
    InvalidOutput {
        /// Rendered command line
        command: String,
    },
}

/// Specfile discovery and parsing errors
#[derive(Error, Debug)]
pub enum SpecfileError {
    /// No specfile in the package directory
    #[error("No specfile found in {dir}")]
    NotFound {
        /// Directory searched
        dir: PathBuf,
    },

    /// More than one specfile in the package directory
    #[error("Expected exactly one specfile in {dir}, found {count}")]
    Ambiguous {
        /// Directory searched
        dir: PathBuf,
        /// Number of specfiles found
        count: usize,
    },

    /// Package directory does not exist
    #[error("Package directory {path} does not exist")]
    MissingPackageDir {
        /// Expected directory
        path: PathBuf,
    },

    /// Invalid glob pattern built from the directory path
    #[error("Invalid specfile pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Errors raised while building the plan
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// An update step needs a name-version-release that could not be queried
    #[error("Package version for branch '{branch}' is unavailable; cannot run '{step}'")]
    VerrelUnavailable {
        /// Branch being planned
        branch: String,
        /// Step needing the value
        step: String,
    },

    /// A failure after commands ran; the rollback plan was replayed
    #[error("{source} (planned changes were rolled back)")]
    RolledBack {
        /// Underlying error
        #[source]
        source: Box<FlowError>,
    },

    /// A package in --packages failed
    #[error("Package '{package}' failed: {source}")]
    PackageFailed {
        /// Package name
        package: String,
        /// Packages that completed before this one
        completed: usize,
        /// Underlying error
        #[source]
        source: Box<FlowError>,
    },
}

impl FlowError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            FlowError::Config(ConfigError::NoBranchSelected) => vec![
                "Pass --master to work on the default branch".to_string(),
                "Pass --branches=f39,f40 to work on release branches".to_string(),
            ],
            FlowError::Config(ConfigError::MissingBugId) => {
                vec!["Add --rhbug=<id> naming the bug the private branch is for".to_string()]
            }
            FlowError::Config(ConfigError::PrivateBranchExists { branch }) => vec![
                format!("Delete the stale branch: git branch --delete --force {}", branch),
                "Or reuse it by checking it out and omitting --private-branch".to_string(),
            ],
            FlowError::Config(ConfigError::UnknownCurrentBranch { .. }) => vec![
                "Check out a branch before running (HEAD is detached)".to_string(),
                "Or pass --stay to skip switching back".to_string(),
            ],
            FlowError::Specfile(SpecfileError::Ambiguous { .. }) => {
                vec!["Remove stray .spec files from the package directory".to_string()]
            }
            FlowError::Exec(ExecError::LaunchFailed { .. }) => vec![
                "Install the missing tool (fedpkg, rpmdevtools, bodhi-client)".to_string(),
                "Point --fedpkg at the packaging helper if it is not on PATH".to_string(),
            ],
            FlowError::Workflow(WorkflowError::VerrelUnavailable { .. }) => vec![
                "Run 'fedpkg verrel' on the branch to see why the query fails".to_string(),
            ],
            FlowError::Workflow(
                WorkflowError::PackageFailed { source, .. } | WorkflowError::RolledBack { source },
            ) => source.recovery_suggestions(),
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Configuration and specfile errors, raised while planning
    pub fn is_config_error(&self) -> bool {
        match self {
            FlowError::Config(_) | FlowError::Specfile(_) => true,
            FlowError::Workflow(
                WorkflowError::PackageFailed { source, .. } | WorkflowError::RolledBack { source },
            ) => source.is_config_error(),
            _ => false,
        }
    }

    /// Whether any planned command ran before this error
    pub fn ran_commands(&self) -> bool {
        match self {
            FlowError::Workflow(WorkflowError::RolledBack { .. }) => true,
            FlowError::Workflow(WorkflowError::PackageFailed {
                completed, source, ..
            }) => *completed > 0 || source.ran_commands(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_branch_hint_names_branch() {
        let err = FlowError::from(ConfigError::PrivateBranchExists {
            branch: "private-f40-rh123".to_string(),
        });
        let hints = err.recovery_suggestions();
        assert!(hints[0].contains("private-f40-rh123"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_package_failure_forwards_suggestions() {
        let err = FlowError::Workflow(WorkflowError::PackageFailed {
            package: "foo".to_string(),
            completed: 0,
            source: Box::new(ConfigError::MissingBugId.into()),
        });
        assert!(err.is_config_error());
        assert!(!err.ran_commands());
        assert!(err.recovery_suggestions()[0].contains("--rhbug"));
    }

    #[test]
    fn test_later_package_failure_ran_commands() {
        let err = FlowError::Workflow(WorkflowError::PackageFailed {
            package: "bar".to_string(),
            completed: 1,
            source: Box::new(
                SpecfileError::MissingPackageDir {
                    path: PathBuf::from("/srv/pkgs/bar"),
                }
                .into(),
            ),
        });
        assert!(err.is_config_error());
        assert!(err.ran_commands());
    }

    #[test]
    fn test_rolled_back_config_error_ran_commands() {
        let err = FlowError::Workflow(WorkflowError::RolledBack {
            source: Box::new(
                ConfigError::PrivateBranchExists {
                    branch: "private-f40-rh1".to_string(),
                }
                .into(),
            ),
        });
        assert!(err.is_config_error());
        assert!(err.ran_commands());
        assert!(err.to_string().contains("rolled back"));
        assert!(err.recovery_suggestions()[0].contains("private-f40-rh1"));
    }

    #[test]
    fn test_non_zero_exit_shows_stderr() {
        let err = ExecError::NonZeroExit {
            command: "fedpkg --release=f40 verrel".to_string(),
            status: "exit status: 1".to_string(),
            stderr: Some("could not find specfile".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Command 'fedpkg --release=f40 verrel' failed with exit status: 1: could not find specfile"
        );

        let silent = ExecError::NonZeroExit {
            command: "fedpkg build".to_string(),
            status: "exit status: 2".to_string(),
            stderr: None,
        };
        assert_eq!(silent.to_string(), "Command 'fedpkg build' failed with exit status: 2");
    }
}

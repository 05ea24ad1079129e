//! Workflow run over the current directory or each selected package.

use std::path::PathBuf;

use crate::cli::RuntimeConfig;
use crate::error::{ConfigError, Result, WorkflowError};
use crate::options::RunOptions;
use crate::specfile;
use crate::transaction::{Executor, ProcessExecutor};
use crate::workflow::{Session, ToolCommands, WorkflowDriver, detect_current_branch};

/// Packages directory under the home directory
const DEFAULT_PACKAGES_DIR: &str = "fedora-scm";

/// Run the workflow for every selected package, stopping at the first failure
pub(super) fn execute_run(options: &RunOptions, config: &RuntimeConfig) -> Result<()> {
    let executor = ProcessExecutor;

    if options.packages.is_empty() {
        let workdir = std::env::current_dir()?;
        return run_package(options, config, &executor, workdir);
    }

    let base = packages_dir(options)?;
    config.verbose_println(&format!("Packages directory: {}", base.display()));

    let workdirs = options
        .packages
        .iter()
        .map(|package| specfile::package_dir(&base, package))
        .collect::<Result<Vec<_>>>()?;

    for (completed, (package, workdir)) in options.packages.iter().zip(workdirs).enumerate() {
        config.output().section(package);
        run_package(options, config, &executor, workdir).map_err(|e| {
            WorkflowError::PackageFailed {
                package: package.clone(),
                completed,
                source: Box::new(e),
            }
        })?;
        config.success_println(&format!("{} done", package));
    }
    Ok(())
}

fn run_package<E: Executor>(
    options: &RunOptions,
    config: &RuntimeConfig,
    executor: &E,
    workdir: PathBuf,
) -> Result<()> {
    let tools = ToolCommands::new(&options.fedpkg, options.dist.clone());
    let original_branch = if options.stay {
        None
    } else {
        Some(detect_current_branch(executor, &tools, &workdir)?)
    };
    log::info!(
        "running in {} (original branch: {})",
        workdir.display(),
        original_branch.as_deref().unwrap_or("-")
    );

    let session = Session {
        workdir,
        original_branch,
    };
    WorkflowDriver::new(options, session, executor, config.output().clone()).run()
}

/// Absolute packages directory; commands run inside it and receive paths below it
fn packages_dir(options: &RunOptions) -> Result<PathBuf> {
    let dir = match &options.packages_dir {
        Some(dir) => dir.clone(),
        None => dirs::home_dir()
            .map(|home| home.join(DEFAULT_PACKAGES_DIR))
            .ok_or(ConfigError::NoHomeDirectory)?,
    };
    Ok(std::path::absolute(dir)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packages_dir_override() {
        let options = RunOptions {
            packages_dir: Some(PathBuf::from("/srv/pkgs")),
            ..RunOptions::default()
        };
        assert_eq!(packages_dir(&options).unwrap(), PathBuf::from("/srv/pkgs"));
    }

    #[test]
    fn test_relative_packages_dir_is_made_absolute() {
        let options = RunOptions {
            packages_dir: Some(PathBuf::from("pkgs")),
            ..RunOptions::default()
        };
        let dir = packages_dir(&options).unwrap();
        assert!(dir.is_absolute());
        assert_eq!(dir, std::env::current_dir().unwrap().join("pkgs"));
    }

    #[test]
    fn test_packages_dir_default_is_under_home() {
        if let Some(home) = dirs::home_dir() {
            let dir = packages_dir(&RunOptions::default()).unwrap();
            assert_eq!(dir, home.join("fedora-scm"));
        }
    }
}

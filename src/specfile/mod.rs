//! Specfile discovery and the small bits of RPM metadata the workflow needs.

mod verrel;

pub use verrel::Verrel;

use std::path::{Path, PathBuf};

use crate::error::{Result, SpecfileError};

/// Find the single `*.spec` file in `dir`
pub fn find_specfile(dir: &Path) -> Result<PathBuf> {
    let pattern = glob::Pattern::escape(&dir.display().to_string()) + "/*.spec";
    log::trace!("searching specfiles with {}", pattern);

    let mut found: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(SpecfileError::from)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    match found.len() {
        0 => Err(SpecfileError::NotFound {
            dir: dir.to_path_buf(),
        }
        .into()),
        1 => Ok(found.remove(0)),
        count => Err(SpecfileError::Ambiguous {
            dir: dir.to_path_buf(),
            count,
        }
        .into()),
    }
}

/// Directory of package `name` under the packages directory
pub fn package_dir(base: &Path, name: &str) -> Result<PathBuf> {
    let path = base.join(name);
    if !path.is_dir() {
        return Err(SpecfileError::MissingPackageDir { path }.into());
    }
    Ok(path)
}

/// Source file names from `spectool --list-files` output.
///
/// Lines look like `Source0: https://example.org/foo-1.0.tar.gz`; the file
/// name is the last path segment of the URL. Patches are ignored.
pub fn parse_source_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| line.split_once(':'))
        .filter(|(tag, _)| tag.trim().starts_with("Source"))
        .filter_map(|(_, location)| {
            let location = location.trim();
            let name = location.rsplit('/').next().unwrap_or(location);
            let name = name.split(['#', '?']).next().unwrap_or(name);
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Changelog entry text for `rpmdev-bumpspec` when none was given
pub fn changelog_comment(
    new_version: Option<&str>,
    private: bool,
    bug: Option<&str>,
) -> String {
    let base = match (new_version, private, bug) {
        (Some(version), _, _) => format!("Update to {}", version),
        (None, true, Some(bug)) => return format!("Private build for rhbz#{}", bug),
        _ => "Rebuild".to_string(),
    };
    match bug {
        Some(bug) => format!("{} (rhbz#{})", base, bug),
        None => base,
    }
}

/// `sed` expression appending `.rh<bug>` to the release before `%{?dist}`
pub fn release_qualifier_expr(bug: &str) -> String {
    format!(r"s/^\(Release:.*\)%{{?dist}}/\1.rh{}%{{?dist}}/", bug)
}

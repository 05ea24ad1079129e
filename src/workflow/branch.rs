//! Branch selection and per-run session state.

use std::path::PathBuf;

/// Name of the default branch
pub const DEFAULT_BRANCH: &str = "master";

/// Remote pushed to
pub const DEFAULT_REMOTE: &str = "origin";

/// Ordered branches to work on; `None` is the default branch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSelection {
    branches: Vec<Option<String>>,
}

impl BranchSelection {
    /// Build from the --master flag and the --branches list.
    ///
    /// The default branch comes first. Duplicates are dropped, keeping the
    /// first occurrence; naming `master` explicitly is the default branch.
    pub fn from_flags(master: bool, named: &[String]) -> Self {
        let mut selection = Self::default();
        if master {
            selection.push(None);
        }
        for name in named {
            let name = name.trim();
            if name == DEFAULT_BRANCH {
                selection.push(None);
            } else if !name.is_empty() {
                selection.push(Some(name.to_string()));
            }
        }
        selection
    }

    fn push(&mut self, branch: Option<String>) {
        if !self.branches.contains(&branch) {
            self.branches.push(branch);
        }
    }

    /// Whether no branch was selected
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Branches in planning order
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.branches.iter().map(Option::as_deref)
    }

    /// Number of selected branches
    pub fn len(&self) -> usize {
        self.branches.len()
    }
}

/// Checked-out name for a selected branch
pub fn branch_name(branch: Option<&str>) -> &str {
    branch.unwrap_or(DEFAULT_BRANCH)
}

/// Private working branch for `base` and bug `bug`
pub fn private_branch_name(base: &str, bug: &str) -> String {
    format!("private-{}-rh{}", base, bug)
}

/// Explicit working state of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Directory every command runs in
    pub workdir: PathBuf,
    /// Branch checked out when the run started; `None` with --stay
    pub original_branch: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_orders_master_first_and_dedups() {
        let named = vec!["f39".to_string(), "f40".to_string(), "f39".to_string()];
        let selection = BranchSelection::from_flags(true, &named);
        assert_eq!(
            selection.iter().collect::<Vec<_>>(),
            [None, Some("f39"), Some("f40")]
        );
    }

    #[test]
    fn test_explicit_master_is_default_branch() {
        let named = vec!["master".to_string(), " ".to_string()];
        let selection = BranchSelection::from_flags(true, &named);
        assert_eq!(selection.len(), 1);
        assert_eq!(branch_name(selection.iter().next().unwrap()), "master");
    }

    #[test]
    fn test_private_branch_name() {
        assert_eq!(private_branch_name("b", "123"), "private-b-rh123");
        assert_eq!(private_branch_name("f40", "2001"), "private-f40-rh2001");
    }
}

//! Pure builders for every external command the workflow plans or queries.

use std::path::Path;

use super::branch::{DEFAULT_BRANCH, DEFAULT_REMOTE};
use crate::options::UpdateType;
use crate::transaction::Command;

const GIT: &str = "git";
const BUMPSPEC: &str = "rpmdev-bumpspec";
const SPECTOOL: &str = "spectool";
const SED: &str = "sed";
const BODHI: &str = "bodhi";

/// Command factory bound to the configured packaging helper
#[derive(Debug, Clone)]
pub struct ToolCommands {
    fedpkg: String,
    dist: Option<String>,
}

impl ToolCommands {
    /// Create a factory for `fedpkg` with an optional release override
    pub fn new(fedpkg: impl Into<String>, dist: Option<String>) -> Self {
        Self {
            fedpkg: fedpkg.into(),
            dist,
        }
    }

    fn fedpkg(&self, release: Option<&str>) -> Command {
        Command::new(&self.fedpkg).opt_arg(release.map(|r| format!("--release={}", r)))
    }

    fn fedpkg_dist(&self) -> Command {
        self.fedpkg(self.dist.as_deref())
    }

    /// `git checkout <branch>`
    pub fn checkout(&self, branch: &str) -> Command {
        Command::new(GIT).args(["checkout", branch])
    }

    /// `git checkout -b <branch>`
    pub fn checkout_new(&self, branch: &str) -> Command {
        Command::new(GIT).args(["checkout", "-b", branch])
    }

    /// `git symbolic-ref --short HEAD`
    pub fn current_branch(&self) -> Command {
        Command::new(GIT).args(["symbolic-ref", "--short", "HEAD"])
    }

    /// `git show-ref --verify --quiet refs/heads/<branch>`; succeeds when it exists
    pub fn branch_exists(&self, branch: &str) -> Command {
        Command::new(GIT)
            .args(["show-ref", "--verify", "--quiet"])
            .arg(format!("refs/heads/{}", branch))
    }

    /// `git branch --delete --force <branch>`
    pub fn delete_branch(&self, branch: &str) -> Command {
        Command::new(GIT).args(["branch", "--delete", "--force", branch])
    }

    /// `git merge --ff-only master`
    pub fn merge_default(&self) -> Command {
        Command::new(GIT).args(["merge", "--ff-only", DEFAULT_BRANCH])
    }

    /// `git push --force --set-upstream origin <branch>`
    pub fn push(&self, branch: &str) -> Command {
        Command::new(GIT).args(["push", "--force", "--set-upstream", DEFAULT_REMOTE, branch])
    }

    /// `fedpkg [--release=<r>] verrel`; the release is --dist, else the named branch
    pub fn verrel(&self, branch: Option<&str>) -> Command {
        self.fedpkg(self.dist.as_deref().or(branch)).arg("verrel")
    }

    /// `fedpkg [--release=<dist>] build`
    pub fn build(&self) -> Command {
        self.fedpkg_dist().arg("build")
    }

    /// `fedpkg [--release=<dist>] build --scratch --srpm`
    pub fn scratch_build(&self) -> Command {
        self.fedpkg_dist().args(["build", "--scratch", "--srpm"])
    }

    /// `fedpkg [--release=<dist>] commit -c`
    pub fn commit(&self) -> Command {
        self.fedpkg_dist().args(["commit", "-c"])
    }

    /// `fedpkg [--release=<dist>] new-sources <files>`
    pub fn new_sources(&self, files: &[String]) -> Command {
        self.fedpkg_dist().arg("new-sources").args(files)
    }

    /// `rpmdev-bumpspec [--new=<version>] --comment=<text> <specfile>`
    pub fn bumpspec(&self, version: Option<&str>, comment: &str, specfile: &Path) -> Command {
        Command::new(BUMPSPEC)
            .opt_arg(version.map(|v| format!("--new={}", v)))
            .arg(format!("--comment={}", comment))
            .arg(specfile.display().to_string())
    }

    /// `sed -i -e <expr> <specfile>`
    pub fn edit_specfile(&self, expr: &str, specfile: &Path) -> Command {
        Command::new(SED)
            .args(["-i", "-e", expr])
            .arg(specfile.display().to_string())
    }

    /// `spectool --get-files <specfile>`
    pub fn download_sources(&self, specfile: &Path) -> Command {
        Command::new(SPECTOOL)
            .arg("--get-files")
            .arg(specfile.display().to_string())
    }

    /// `spectool --list-files --sources <specfile>`
    pub fn list_sources(&self, specfile: &Path) -> Command {
        Command::new(SPECTOOL)
            .args(["--list-files", "--sources"])
            .arg(specfile.display().to_string())
    }

    /// `bodhi updates new --type=<t> [--bugs=<bug>] --notes=<notes> <verrel>`
    pub fn update_new(
        &self,
        update_type: UpdateType,
        bug: Option<&str>,
        notes: &str,
        verrel: &str,
    ) -> Command {
        Command::new(BODHI)
            .args(["updates", "new"])
            .arg(format!("--type={}", update_type.as_str()))
            .opt_arg(bug.map(|b| format!("--bugs={}", b)))
            .arg(format!("--notes={}", notes))
            .arg(verrel)
    }

    /// `bodhi updates request <verrel> stable`
    pub fn update_stable(&self, verrel: &str) -> Command {
        Command::new(BODHI).args(["updates", "request", verrel, "stable"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_fedpkg_commands_carry_dist_only_when_set() {
        let plain = ToolCommands::new("fedpkg", None);
        assert_eq!(plain.build().render(), "fedpkg build");
        assert_eq!(plain.scratch_build().render(), "fedpkg build --scratch --srpm");

        let dist = ToolCommands::new("/opt/fedpkg", Some("epel9".to_string()));
        assert_eq!(dist.build().render(), "/opt/fedpkg --release=epel9 build");
        assert_eq!(dist.commit().render(), "/opt/fedpkg --release=epel9 commit -c");
    }

    #[test]
    fn test_verrel_release_selection() {
        let tools = ToolCommands::new("fedpkg", None);
        assert_eq!(tools.verrel(None).render(), "fedpkg verrel");
        assert_eq!(tools.verrel(Some("f40")).render(), "fedpkg --release=f40 verrel");

        let tools = ToolCommands::new("fedpkg", Some("epel9".to_string()));
        assert_eq!(tools.verrel(Some("f40")).render(), "fedpkg --release=epel9 verrel");
    }

    #[test]
    fn test_git_commands() {
        let tools = ToolCommands::new("fedpkg", None);
        assert_eq!(
            tools.push("f40").render(),
            "git push --force --set-upstream origin f40"
        );
        assert_eq!(
            tools.branch_exists("private-f40-rh1").render(),
            "git show-ref --verify --quiet refs/heads/private-f40-rh1"
        );
        assert_eq!(tools.merge_default().render(), "git merge --ff-only master");
    }

    #[test]
    fn test_bumpspec_and_update() {
        let tools = ToolCommands::new("fedpkg", None);
        let spec = PathBuf::from("/pkgs/foo/foo.spec");
        assert_eq!(
            tools.bumpspec(Some("1.2"), "Update to 1.2", &spec).render(),
            "rpmdev-bumpspec --new=1.2 '--comment=Update to 1.2' /pkgs/foo/foo.spec"
        );
        assert_eq!(
            tools
                .update_new(UpdateType::Security, None, "Security fix update", "foo-1.2-1.fc40")
                .render(),
            "bodhi updates new --type=security '--notes=Security fix update' foo-1.2-1.fc40"
        );
    }
}

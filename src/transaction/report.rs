//! Outcome of a rollback pass.

use super::Command;

/// What happened to one compensating command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// The command ran and exited successfully
    Succeeded,
    /// The command failed; the message is kept for the report
    Failed(String),
    /// Pretend mode: printed, not executed
    Pretended,
}

/// One attempted rollback command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackStep {
    /// The compensating command
    pub command: Command,
    /// Its outcome
    pub outcome: RollbackOutcome,
}

/// Result of a rollback pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollbackReport {
    /// Forward commands that never got to run
    pub skipped: Vec<Command>,
    /// Every rollback command, in execution order
    pub steps: Vec<RollbackStep>,
}

impl RollbackReport {
    /// Whether every rollback command succeeded
    pub fn is_clean(&self) -> bool {
        self.steps
            .iter()
            .all(|step| !matches!(step.outcome, RollbackOutcome::Failed(_)))
    }

    /// Rollback commands that failed
    pub fn failures(&self) -> impl Iterator<Item = &RollbackStep> {
        self.steps
            .iter()
            .filter(|step| matches!(step.outcome, RollbackOutcome::Failed(_)))
    }

    /// Format report for display
    pub fn format_result(&self) -> String {
        let status = if self.is_clean() { "✅" } else { "⚠️" };
        let mut result = format!("{} Rollback completed\n", status);

        if !self.skipped.is_empty() {
            result.push_str("⏭️  Not executed:\n");
            for command in &self.skipped {
                result.push_str(&format!("  - {}\n", command));
            }
        }

        if !self.steps.is_empty() {
            result.push_str("🔄 Rollback commands:\n");
            for step in &self.steps {
                let mark = match &step.outcome {
                    RollbackOutcome::Succeeded => "ok".to_string(),
                    RollbackOutcome::Failed(reason) => format!("failed: {}", reason),
                    RollbackOutcome::Pretended => "pretend".to_string(),
                };
                result.push_str(&format!("  - {} ({})\n", step.command, mark));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_with_failure_is_not_clean() {
        let report = RollbackReport {
            skipped: vec![Command::new("fedpkg").arg("build")],
            steps: vec![
                RollbackStep {
                    command: Command::new("git").args(["checkout", "f40"]),
                    outcome: RollbackOutcome::Succeeded,
                },
                RollbackStep {
                    command: Command::new("git").args(["branch", "--delete", "--force", "x"]),
                    outcome: RollbackOutcome::Failed("exit status: 1".to_string()),
                },
            ],
        };
        assert!(!report.is_clean());
        assert_eq!(report.failures().count(), 1);

        let text = report.format_result();
        assert!(text.contains("fedpkg build"));
        assert!(text.contains("git checkout f40 (ok)"));
        assert!(text.contains("failed: exit status: 1"));
    }

    #[test]
    fn test_empty_report_is_clean() {
        assert!(RollbackReport::default().is_clean());
    }
}

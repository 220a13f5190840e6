//! Per-step results of one generation run

use crate::runtime::composer::RegistrationReport;
use std::path::PathBuf;

/// Whether one artifact made it to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// The file exists after the step. `warning` holds an I/O error reported
    /// on the way, in which case the file may be stale or partial.
    Created { warning: Option<String> },
    Failed { reason: String },
}

/// Result of one generation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub label: String,
    /// Absolute or base-relative path that was written
    pub path: PathBuf,
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self.status, StepStatus::Created { .. })
    }

    /// The user-facing line for this step
    pub fn line(&self, package: &str) -> String {
        match &self.status {
            StepStatus::Created { .. } => format!("[{}] {} has been created.", package, self.label),
            StepStatus::Failed { .. } => {
                format!("[{}] {} could not be created.", package, self.label)
            }
        }
    }
}

/// Everything a session produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub package: String,
    pub target_dir: PathBuf,
    pub steps: Vec<StepOutcome>,
    /// Present only when registration was requested
    pub registration: Option<RegistrationReport>,
}

impl GenerationReport {
    pub fn new(package: impl Into<String>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            package: package.into(),
            target_dir: target_dir.into(),
            steps: Vec::new(),
            registration: None,
        }
    }

    pub fn created_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_created()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| !s.is_created())
    }

    /// Every step succeeded
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Final line printed after all steps
    pub fn summary(&self) -> String {
        format!("The package {} has been created.", self.package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(label: &str, status: StepStatus) -> StepOutcome {
        StepOutcome {
            label: label.to_string(),
            path: PathBuf::from(label),
            status,
        }
    }

    #[test]
    fn test_step_lines() {
        let ok = step("README file", StepStatus::Created { warning: None });
        let failed = step(
            "docs folder",
            StepStatus::Failed {
                reason: "denied".to_string(),
            },
        );

        assert_eq!(
            ok.line("ambersive/demo"),
            "[ambersive/demo] README file has been created."
        );
        assert_eq!(
            failed.line("ambersive/demo"),
            "[ambersive/demo] docs folder could not be created."
        );
    }

    #[test]
    fn test_report_counts() {
        let mut report = GenerationReport::new("ambersive/demo", "packages/ambersive/demo");
        report.steps.push(step("a", StepStatus::Created { warning: None }));
        report.steps.push(step(
            "b",
            StepStatus::Failed {
                reason: "x".to_string(),
            },
        ));

        assert_eq!(report.created_count(), 1);
        assert_eq!(report.failures().count(), 1);
        assert!(!report.is_complete());
        assert_eq!(report.summary(), "The package ambersive/demo has been created.");
    }
}

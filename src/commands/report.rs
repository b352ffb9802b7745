//! Outcome reporting for `--json` and human-readable output.

use crate::copybara::Workflow;
use crate::error::BaraError;
use crate::exit_codes::{self, ExitOutcome, Namespace, Outcome};
use serde::Serialize;

/// Machine-readable summary of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Namespace>,
    pub outcome: Outcome,
    pub message: String,
}

impl Report {
    pub fn from_outcome(workflow: &Workflow, outcome: &ExitOutcome) -> Self {
        Self {
            workflow: Some(workflow.to_string()),
            exit_code: outcome.code,
            namespace: exit_codes::lookup(outcome.code).map(|e| e.ns),
            outcome: outcome.outcome,
            message: outcome.message().to_string(),
        }
    }

    pub fn from_error(err: &BaraError) -> Self {
        let exit_code = err.exit_code();
        Self {
            workflow: None,
            exit_code,
            namespace: exit_codes::lookup(exit_code).map(|e| e.ns),
            outcome: Outcome::Error,
            message: err.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        // A struct of strings, ints and unit enums always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Print the result of a successful run.
pub fn print_outcome(workflow: &Workflow, outcome: &ExitOutcome, json: bool) {
    if json {
        println!("{}", Report::from_outcome(workflow, outcome).to_json());
    } else if outcome.is_warning() {
        println!(
            "Workflow '{}' finished with a warning: {} (exit code {})",
            workflow,
            outcome.message(),
            outcome.code
        );
    } else {
        println!("Workflow '{}' completed successfully.", workflow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_report_json() {
        let outcome = exit_codes::classify(Some(4)).unwrap();
        let report = Report::from_outcome(&Workflow::Push, &outcome);
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();

        assert_eq!(
            value,
            json!({
                "workflow": "push",
                "exit_code": 4,
                "namespace": "copybara",
                "outcome": "warning",
                "message": "No changes to migrate"
            })
        );
    }

    #[test]
    fn error_report_uses_exit_code_of_error() {
        let report = Report::from_error(&BaraError::Copybara { code: 3 });
        assert_eq!(report.exit_code, 3);
        assert_eq!(report.namespace, Some(Namespace::Copybara));
        assert_eq!(report.outcome, Outcome::Error);

        let report = Report::from_error(&BaraError::Validation("missing".to_string()));
        assert_eq!(report.exit_code, 50);
        assert_eq!(report.namespace, Some(Namespace::Action));
        assert!(!report.to_json().contains("workflow"));
    }
}

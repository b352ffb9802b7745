//! Exit code table for bara-sync.
//!
//! Codes 0-31 belong to the Copybara engine and are reported by the
//! container. Codes 50-52 are this tool's own:
//! - 50: Configuration validation failed
//! - 51: Subprocess could not be started
//! - 52: Unknown error (sentinel for anything not in the table)

use crate::error::{BaraError, Result};
use serde::Serialize;

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Copybara found nothing to migrate.
pub const NO_OP: i32 = 4;

/// Missing or invalid configuration, detected before docker runs.
pub const CONFIG_ERROR: i32 = 50;

/// Docker could not be spawned, or a host file could not be written.
pub const SPAWN_ERROR: i32 = 51;

/// Sentinel for exit codes the table does not know about.
pub const UNKNOWN_ERROR: i32 = 52;

/// Which program an exit code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Copybara,
    Action,
}

/// How an exit code should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Warning,
    Error,
}

/// One row of the exit code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCodeEntry {
    pub code: i32,
    pub ns: Namespace,
    pub outcome: Outcome,
    pub message: &'static str,
}

const fn entry(code: i32, ns: Namespace, outcome: Outcome, message: &'static str) -> ExitCodeEntry {
    ExitCodeEntry {
        code,
        ns,
        outcome,
        message,
    }
}

/// The complete exit code table.
pub const EXIT_CODES: &[ExitCodeEntry] = &[
    entry(SUCCESS, Namespace::Copybara, Outcome::Success, "Copybara completed successfully"),
    entry(1, Namespace::Copybara, Outcome::Error, "Command line error"),
    entry(2, Namespace::Copybara, Outcome::Error, "Configuration error"),
    entry(3, Namespace::Copybara, Outcome::Error, "Repository error"),
    entry(NO_OP, Namespace::Copybara, Outcome::Warning, "No changes to migrate"),
    entry(8, Namespace::Copybara, Outcome::Error, "Interrupted"),
    entry(30, Namespace::Copybara, Outcome::Error, "Environment error"),
    entry(31, Namespace::Copybara, Outcome::Error, "Internal error"),
    entry(CONFIG_ERROR, Namespace::Action, Outcome::Error, "Configuration validation failed"),
    entry(SPAWN_ERROR, Namespace::Action, Outcome::Error, "Subprocess could not be started"),
    entry(UNKNOWN_ERROR, Namespace::Action, Outcome::Error, "Unknown error"),
];

/// Look up an exit code in the table.
pub fn lookup(code: i32) -> Option<&'static ExitCodeEntry> {
    EXIT_CODES.iter().find(|e| e.code == code)
}

/// Human-readable description of an exit code.
pub fn describe(code: i32) -> &'static str {
    lookup(code).map(|e| e.message).unwrap_or("Unknown error")
}

/// A non-fatal container outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExitOutcome {
    pub code: i32,
    pub outcome: Outcome,
}

impl ExitOutcome {
    pub fn is_warning(&self) -> bool {
        self.outcome == Outcome::Warning
    }

    pub fn message(&self) -> &'static str {
        describe(self.code)
    }
}

/// Classify a container exit code.
///
/// Copybara success and warning codes are returned as `Ok`. Other Copybara
/// codes become `BaraError::Copybara`. Codes outside the Copybara namespace,
/// codes missing from the table, and processes killed without a code all
/// become `BaraError::UnknownExit`.
pub fn classify(code: Option<i32>) -> Result<ExitOutcome> {
    let Some(code) = code else {
        return Err(BaraError::UnknownExit { code: None });
    };

    match lookup(code) {
        Some(entry) if entry.ns == Namespace::Copybara => match entry.outcome {
            Outcome::Success | Outcome::Warning => Ok(ExitOutcome {
                code,
                outcome: entry.outcome,
            }),
            Outcome::Error => Err(BaraError::Copybara { code }),
        },
        _ => Err(BaraError::UnknownExit { code: Some(code) }),
    }
}

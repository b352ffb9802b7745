//! Error types for bara-sync.
//!
//! Uses thiserror for derive macros. Every variant knows which process exit
//! code it maps to, so callers can pattern-match on the outcome kind instead
//! of inspecting raw codes.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for bara-sync operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BaraError {
    /// A required configuration value is missing. Detected before any
    /// subprocess is spawned.
    #[error("{0}")]
    Validation(String),

    /// The YAML config file could not be read or parsed.
    #[error("{0}")]
    ConfigFile(String),

    /// Filesystem or process-spawn failure on the host side.
    #[error("{0}")]
    Io(String),

    /// Copybara exited with a code the exit table classifies as fatal.
    #[error("Copybara failed with exit code {code}: {}", exit_codes::describe(*code))]
    Copybara { code: i32 },

    /// The subprocess exited with a code outside the Copybara namespace, or
    /// was terminated without one.
    #[error("{}", unknown_exit_message(*code))]
    UnknownExit { code: Option<i32> },
}

fn unknown_exit_message(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("unknown error: container exited with code {}", code),
        None => "unknown error: container terminated without an exit code".to_string(),
    }
}

impl BaraError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BaraError::Validation(_) | BaraError::ConfigFile(_) => exit_codes::CONFIG_ERROR,
            BaraError::Io(_) => exit_codes::SPAWN_ERROR,
            BaraError::Copybara { code } => *code,
            BaraError::UnknownExit { .. } => exit_codes::UNKNOWN_ERROR,
        }
    }
}

/// Result type alias for bara-sync operations.
pub type Result<T> = std::result::Result<T, BaraError>;

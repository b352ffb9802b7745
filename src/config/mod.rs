//! Configuration model for bara-sync.
//!
//! This module defines the `CopybaraConfig` struct that represents
//! `bara-sync.yaml`. It supports forward-compatible YAML parsing (unknown
//! fields are ignored), sensible defaults for optional fields, and the
//! workflow-dependent validation that runs before any container is started.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{CopybaraConfig, DockerConfig, RepoConfig, WorkflowConfig};
pub use types::DEFAULT_CONFIG_FILE;

//! Config struct definitions and default implementations.

use super::types::*;
use crate::copybara::host::HostPaths;
use crate::sky::TransformRule;
use crate::sky::transform::deserialize_rules;
use serde::Deserialize;

/// Configuration for one bara-sync invocation.
///
/// This struct represents the contents of `bara-sync.yaml`. It is built once
/// per invocation and never mutated afterwards.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CopybaraConfig {
    // =========================================================================
    // Common settings
    // =========================================================================
    /// Source-of-truth repository and branch.
    pub sot: RepoConfig,

    /// Destination repository and branch.
    pub destination: RepoConfig,

    /// Committer identity, e.g. `Bot <bot@example.com>`.
    pub committer: String,

    // =========================================================================
    // Workflow settings
    // =========================================================================
    /// Push workflow (source of truth to destination).
    pub push: WorkflowConfig,

    /// Pull-request workflow (destination back to source of truth).
    pub pr: WorkflowConfig,

    // =========================================================================
    // Advanced settings
    // =========================================================================
    /// Path to a hand-written copy.bara.sky used instead of the generated one.
    pub custom_config: String,

    /// Workflow to run when none is given on the command line.
    pub workflow: String,

    /// Extra Copybara options passed through to the container.
    pub copybara_options: Vec<String>,

    /// known_hosts content. Provisioning it on the host is left to the caller.
    pub known_hosts: String,

    /// Pull request number used as the source ref of the `pr` workflow.
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub pr_number: String,

    /// Whether the destination repository should be created first.
    pub create_repo: bool,

    /// Copybara container image.
    pub image: DockerConfig,

    /// Host files mounted into the container.
    pub host: HostPaths,
}

/// A GitHub repository (`owner/name`) and branch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub repo: String,
    pub branch: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            branch: default_branch(),
        }
    }
}

/// One side (push or pr) of the synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Globs of files the workflow covers.
    pub include: Vec<String>,

    /// Globs of files excluded from the workflow.
    pub exclude: Vec<String>,

    /// Move rules, encoded as `from||to||paths`.
    #[serde(rename = "move", deserialize_with = "deserialize_rules")]
    pub moves: Vec<TransformRule>,

    /// Replace rules, encoded as `before||after||paths`.
    #[serde(rename = "replace", deserialize_with = "deserialize_rules")]
    pub replacements: Vec<TransformRule>,

    /// Commit message substituted for `${PR_MESSAGE}` in the template.
    pub message: String,

    /// Commit message template for change requests.
    pub template: String,

    /// Branch name template for change requests (empty uses Copybara's default).
    pub branch_name_template: String,
}

impl WorkflowConfig {
    /// True when the include list has at least one non-empty glob.
    pub fn has_include(&self) -> bool {
        self.include.iter().any(|g| !g.is_empty())
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            moves: Vec::new(),
            replacements: Vec::new(),
            message: default_message(),
            template: default_template(),
            branch_name_template: String::new(),
        }
    }
}

/// Container image of the Copybara engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    pub name: String,
    pub tag: String,
}

impl DockerConfig {
    /// Image reference in `name:tag` form.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.name, self.tag)
    }
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            name: default_image_name(),
            tag: default_image_tag(),
        }
    }
}

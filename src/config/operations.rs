//! Config loading, validation, and workflow selection.

use super::model::CopybaraConfig;
use crate::copybara::Workflow;
use crate::error::{BaraError, Result};
use std::path::Path;
use tracing::debug;

impl CopybaraConfig {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    /// Validation is workflow-dependent and happens later, in [`Self::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            BaraError::ConfigFile(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(yaml)
            .map_err(|e| BaraError::ConfigFile(format!("failed to parse config YAML: {}", e)))
    }

    /// Check the values required to render the document for `workflow`.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// committer, image name, image tag, the workflow's include list, then
    /// both repository identifiers.
    pub fn validate(&self, workflow: &Workflow) -> Result<()> {
        if self.committer.is_empty() {
            return Err(missing("committer"));
        }
        if self.image.name.is_empty() {
            return Err(missing("copybara_image"));
        }
        if self.image.tag.is_empty() {
            return Err(missing("copybara_image_tag"));
        }
        if *workflow == Workflow::Push && !self.push.has_include() {
            return Err(missing("push_include"));
        }
        if *workflow == Workflow::Pr && !self.pr.has_include() {
            return Err(missing("pr_include"));
        }
        if self.sot.repo.is_empty() || self.destination.repo.is_empty() {
            return Err(BaraError::Validation(
                "You need to set values for \"sot_repo\" & \"destination_repo\" or set a value for \"custom_config\"."
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Pick the workflow to run: the explicit one, else the configured one.
    pub fn select_workflow(&self, explicit: Option<&str>) -> Result<Workflow> {
        match explicit.filter(|w| !w.is_empty()) {
            Some(name) => Ok(Workflow::parse(name)),
            None if !self.workflow.is_empty() => Ok(Workflow::parse(&self.workflow)),
            None => Err(missing("workflow")),
        }
    }
}

fn missing(field: &str) -> BaraError {
    BaraError::Validation(format!("You need to set a value for \"{}\".", field))
}

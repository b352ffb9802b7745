//! Invocation controller for the Copybara container.
//!
//! Validates the config, resolves repository URLs, renders the
//! `copy.bara.sky` document, starts the container through a
//! [`ProcessRunner`] and classifies its exit code.

pub mod docker;
pub mod host;

#[cfg(test)]
mod tests;

use crate::config::{CopybaraConfig, DockerConfig};
use crate::error::{BaraError, Result};
use crate::exit_codes::{self, ExitOutcome};
use crate::sky::{self, SkyInput, Side, render_transformations};
use docker::{DockerRunner, ProcessRunner, names_workflow, pull_args, run_args};
use host::HostPaths;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Options always passed to Copybara.
const IGNORE_NOOP: &str = "--ignore-noop";

/// Extra options for the `init` workflow, which rewrites destination history.
const INIT_OPTIONS: &[&str] = &["--force", "--init-history"];

/// A workflow selected by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workflow {
    /// First push, initializing destination history.
    Init,
    /// Mirror the source of truth to the destination.
    Push,
    /// Propose destination changes back to the source of truth.
    Pr,
    /// Any other workflow defined in a custom config.
    Named(String),
}

impl Workflow {
    pub fn parse(name: &str) -> Self {
        match name {
            "init" => Workflow::Init,
            "push" => Workflow::Push,
            "pr" => Workflow::Pr,
            other => Workflow::Named(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Workflow::Init => "init",
            Workflow::Push => "push",
            Workflow::Pr => "pr",
            Workflow::Named(name) => name,
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether repositories should be reached over SSH.
///
/// True iff a non-blank key is supplied.
pub fn use_ssh(ssh_key: Option<&str>) -> bool {
    ssh_key.is_some_and(|k| !k.trim().is_empty())
}

/// GitHub clone URL for `owner/repo`.
pub fn repo_url(owner_repo: &str, use_ssh: bool) -> String {
    if use_ssh {
        format!("git@github.com:{}.git", owner_repo)
    } else {
        format!("https://github.com/{}.git", owner_repo)
    }
}

/// Validate `config` for `workflow` and render the `copy.bara.sky` document.
pub fn get_config(
    workflow: &Workflow,
    config: &CopybaraConfig,
    ssh_key: Option<&str>,
) -> Result<String> {
    config.validate(workflow)?;

    let ssh = use_ssh(ssh_key);
    debug!(%workflow, ssh, "rendering copy.bara.sky");

    let sot_repo = repo_url(&config.sot.repo, ssh);
    let destination_repo = repo_url(&config.destination.repo, ssh);
    let push_include = sky::quoted_list(&config.push.include);
    let push_exclude = sky::quoted_list(&config.push.exclude);
    let push_transformations =
        render_transformations(&config.push.moves, &config.push.replacements, Side::Push);
    let pr_include = sky::quoted_list(&config.pr.include);
    let pr_exclude = sky::quoted_list(&config.pr.exclude);
    let pr_transformations =
        render_transformations(&config.pr.moves, &config.pr.replacements, Side::Pr);

    Ok(sky::render(&SkyInput {
        sot_repo: &sot_repo,
        sot_branch: &config.sot.branch,
        destination_repo: &destination_repo,
        destination_branch: &config.destination.branch,
        committer: &config.committer,
        local_sot: sky::LOCAL_SOT,
        push_include: &push_include,
        push_exclude: &push_exclude,
        push_transformations: &push_transformations,
        pr_include: &pr_include,
        pr_exclude: &pr_exclude,
        pr_transformations: &pr_transformations,
        pr_message: &config.pr.message,
        pr_template: &config.pr.template,
        pr_branch_name_template: &config.pr.branch_name_template,
    }))
}

/// Handle on the Copybara container image.
#[derive(Debug, Clone)]
pub struct Copybara<R: ProcessRunner = DockerRunner> {
    image: DockerConfig,
    host: HostPaths,
    workdir: PathBuf,
    runner: R,
}

impl<R: ProcessRunner> Copybara<R> {
    /// `workdir` is mounted as the container's working directory.
    pub fn new(image: DockerConfig, host: HostPaths, workdir: PathBuf, runner: R) -> Self {
        Self {
            image,
            host,
            workdir,
            runner,
        }
    }

    /// Pull the image. The exit code of `docker pull` is returned unclassified.
    pub fn download(&self) -> Result<i32> {
        info!(image = %self.image.reference(), "pulling image");
        self.runner
            .run("docker", &pull_args(&self.image))?
            .ok_or(BaraError::UnknownExit { code: None })
    }

    /// Run `workflow` in the container.
    ///
    /// `options` are extra Copybara options; `source_ref` is only used by the
    /// `pr` workflow. Success and warning exit codes are returned, every other
    /// outcome is an error.
    pub fn run(
        &self,
        workflow: &Workflow,
        options: &[String],
        source_ref: Option<&str>,
    ) -> Result<ExitOutcome> {
        let workflow_env: Vec<(&str, String)> = match workflow {
            Workflow::Init => vec![("COPYBARA_WORKFLOW", "push".to_string())],
            Workflow::Pr => vec![
                ("COPYBARA_WORKFLOW", "pr".to_string()),
                ("COPYBARA_SOURCEREF", source_ref.unwrap_or_default().to_string()),
            ],
            _ if names_workflow(options) => {
                debug!("options select the workflow, not setting COPYBARA_WORKFLOW");
                Vec::new()
            }
            other => vec![("COPYBARA_WORKFLOW", other.as_str().to_string())],
        };

        let flags: &[&str] = if *workflow == Workflow::Init {
            INIT_OPTIONS
        } else {
            &[]
        };

        let all_options: Vec<String> = flags
            .iter()
            .copied()
            .chain(std::iter::once(IGNORE_NOOP))
            .map(str::to_string)
            .chain(options.iter().cloned())
            .collect();

        self.exec(workflow, &workflow_env, &all_options)
    }

    fn exec(
        &self,
        workflow: &Workflow,
        workflow_env: &[(&str, String)],
        options: &[String],
    ) -> Result<ExitOutcome> {
        let args = run_args(&self.image, &self.host, &self.workdir, workflow_env, options);

        info!(%workflow, image = %self.image.reference(), "running copybara");
        let code = self.runner.run("docker", &args)?;
        let outcome = exit_codes::classify(code)?;

        if outcome.is_warning() {
            warn!(code = outcome.code, "{}", outcome.message());
        } else {
            info!(code = outcome.code, "{}", outcome.message());
        }
        Ok(outcome)
    }
}

//! Docker command-line assembly and execution.
//!
//! The container's entrypoint reads its instructions from the environment
//! (`COPYBARA_CONFIG`, `COPYBARA_WORKFLOW`, `COPYBARA_OPTIONS`, ...), so the
//! command line is only mounts, `-e` flags and the image reference.

use super::host::{
    CONTAINER_CONFIG, CONTAINER_GIT_CONFIG, CONTAINER_GIT_CREDENTIALS, CONTAINER_KNOWN_HOSTS,
    CONTAINER_SSH_KEY, CONTAINER_WORKDIR, HostPaths,
};
use crate::config::DockerConfig;
use crate::error::{BaraError, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Runs a program to completion and reports its exit code.
///
/// A non-zero exit is not an error here; callers classify the code.
/// `Ok(None)` means the process ended without a code (killed by a signal).
pub trait ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<Option<i32>>;
}

/// Spawns the real process with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerRunner;

impl ProcessRunner for DockerRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<Option<i32>> {
        debug!(program, ?args, "spawning");

        let status = Command::new(program).args(args).status().map_err(|e| {
            BaraError::Io(format!(
                "failed to execute {}: {}\nFix: ensure docker is installed and in PATH.",
                program, e
            ))
        })?;

        Ok(status.code())
    }
}

/// Prints the command line instead of running it, and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner;

impl ProcessRunner for DryRunRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<Option<i32>> {
        println!("{}", command_line(program, args));
        Ok(Some(0))
    }
}

/// Shell-quoted rendering of a command line.
pub fn command_line(program: &str, args: &[String]) -> String {
    shell_words::join(std::iter::once(program).chain(args.iter().map(String::as_str)))
}

/// True when an option appears to select a workflow or a config file itself.
pub(crate) fn names_workflow(options: &[String]) -> bool {
    options
        .iter()
        .any(|o| o.contains("migrate") || o.contains("copy.bara.sky"))
}

/// True when an option appears to name a config file.
pub(crate) fn names_config_file(options: &[String]) -> bool {
    options.iter().any(|o| o.contains(".bara.sky"))
}

fn mount(args: &mut Vec<String>, host: &Path, container: &str) {
    args.push("-v".to_string());
    args.push(format!("{}:{}", host.display(), container));
}

fn env(args: &mut Vec<String>, key: &str, value: &str) {
    args.push("-e".to_string());
    args.push(format!("{}={}", key, value));
}

/// Arguments for `docker run`.
///
/// `workflow_env` holds `KEY=value` pairs selecting the workflow; they are
/// placed after the generic mounts and env vars, right before the image.
pub(crate) fn run_args(
    image: &DockerConfig,
    host: &HostPaths,
    workdir: &Path,
    workflow_env: &[(&str, String)],
    options: &[String],
) -> Vec<String> {
    let mut args = vec!["run".to_string()];

    mount(&mut args, workdir, CONTAINER_WORKDIR);

    if host.ssh_key.exists() {
        mount(&mut args, &host.ssh_key, CONTAINER_SSH_KEY);
    } else {
        debug!(path = %host.ssh_key.display(), "no SSH key on host, skipping mount");
    }

    mount(&mut args, &host.known_hosts, CONTAINER_KNOWN_HOSTS);
    mount(&mut args, &host.config, CONTAINER_CONFIG);
    mount(&mut args, &host.git_config, CONTAINER_GIT_CONFIG);
    mount(&mut args, &host.git_credentials, CONTAINER_GIT_CREDENTIALS);

    if !names_config_file(options) {
        env(&mut args, "COPYBARA_CONFIG", CONTAINER_CONFIG);
    }

    if !options.is_empty() {
        env(&mut args, "COPYBARA_OPTIONS", &options.join(" "));
    }

    for (key, value) in workflow_env {
        env(&mut args, key, value);
    }

    args.push(image.reference());
    args
}

/// Arguments for `docker pull`.
pub(crate) fn pull_args(image: &DockerConfig) -> Vec<String> {
    vec!["pull".to_string(), image.reference()]
}

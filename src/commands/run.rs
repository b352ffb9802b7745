//! Implementation of the `bara-sync run` command.
//!
//! # What `bara-sync run` does
//!
//! 1. Loads the config file and picks the workflow
//! 2. Puts copy.bara.sky at the host config path: the custom config if one is
//!    set, otherwise the rendered document
//! 3. Collects Copybara options from the config file and the command line
//! 4. Runs the container and classifies its exit code

use super::report::print_outcome;
use crate::cli::RunArgs;
use crate::config::CopybaraConfig;
use crate::copybara::docker::{DockerRunner, DryRunRunner, ProcessRunner};
use crate::copybara::{self, Copybara, Workflow};
use crate::error::{BaraError, Result};
use crate::exit_codes::ExitOutcome;
use crate::fs::{atomic_write_file, install_file};
use std::path::Path;
use tracing::{info, warn};

/// Execute the `bara-sync run` command.
pub fn cmd_run(config_path: &Path, args: RunArgs, json: bool) -> Result<()> {
    let config = CopybaraConfig::load(config_path)?;
    let workflow = config.select_workflow(args.workflow.as_deref())?;
    let options = collect_options(&config, &args)?;
    let source_ref = source_ref(&config, &args);

    if args.dry_run {
        check_config_file(&config, &workflow, args.key.ssh_key.as_deref())?;
    } else {
        prepare_config_file(&config, &workflow, args.key.ssh_key.as_deref())?;
    }
    warn_unsupported(&config);

    let outcome = if args.dry_run {
        execute(&config, &workflow, &options, source_ref.as_deref(), DryRunRunner)?
    } else {
        execute(&config, &workflow, &options, source_ref.as_deref(), DockerRunner)?
    };

    print_outcome(&workflow, &outcome, json);
    Ok(())
}

fn execute<R: ProcessRunner>(
    config: &CopybaraConfig,
    workflow: &Workflow,
    options: &[String],
    source_ref: Option<&str>,
    runner: R,
) -> Result<ExitOutcome> {
    let workdir = std::env::current_dir().map_err(|e| {
        BaraError::Io(format!("failed to resolve current directory: {}", e))
    })?;

    Copybara::new(config.image.clone(), config.host.clone(), workdir, runner).run(
        workflow,
        options,
        source_ref,
    )
}

/// Options from the config file, then `--option` values, then `--options`.
fn collect_options(config: &CopybaraConfig, args: &RunArgs) -> Result<Vec<String>> {
    let mut options = config.copybara_options.clone();
    options.extend(args.option.iter().cloned());

    if let Some(raw) = &args.options {
        let split = shell_words::split(raw).map_err(|e| {
            BaraError::Validation(format!(
                "failed to parse --options '{}': {}\nFix: check for unmatched quotes.",
                raw, e
            ))
        })?;
        options.extend(split);
    }

    Ok(options)
}

/// `--ref`, falling back to the configured PR number.
fn source_ref(config: &CopybaraConfig, args: &RunArgs) -> Option<String> {
    args.source_ref
        .clone()
        .or_else(|| Some(config.pr_number.clone()).filter(|n| !n.is_empty()))
}

/// Validate and render without touching the host config path.
fn check_config_file(
    config: &CopybaraConfig,
    workflow: &Workflow,
    ssh_key: Option<&str>,
) -> Result<()> {
    if config.custom_config.is_empty() {
        copybara::get_config(workflow, config, ssh_key)?;
    }
    info!(path = %config.host.config.display(), "dry run, not writing copy.bara.sky");
    Ok(())
}

/// Write copy.bara.sky where the container mounts it from.
fn prepare_config_file(
    config: &CopybaraConfig,
    workflow: &Workflow,
    ssh_key: Option<&str>,
) -> Result<()> {
    if config.custom_config.is_empty() {
        let document = copybara::get_config(workflow, config, ssh_key)?;
        atomic_write_file(&config.host.config, &document)?;
    } else {
        info!(source = %config.custom_config, "using custom config");
        install_file(&config.custom_config, &config.host.config)?;
    }
    Ok(())
}

fn warn_unsupported(config: &CopybaraConfig) {
    if config.create_repo {
        warn!(
            repo = %config.destination.repo,
            "create_repo is set, but bara-sync does not create repositories; the destination must exist"
        );
    }
    if !config.known_hosts.is_empty() && !config.host.known_hosts.exists() {
        warn!(
            path = %config.host.known_hosts.display(),
            "known_hosts is set in the config but the host file does not exist"
        );
    }
}

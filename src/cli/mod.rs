//! CLI argument parsing for bara-sync.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// bara-sync: render copy.bara.sky and run the Copybara container.
///
/// Two workflows are generated from one YAML file:
/// - `push` mirrors the source of truth to the destination
/// - `pr` proposes destination changes back to the source of truth
#[derive(Parser, Debug)]
#[command(name = "bara-sync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the bara-sync YAML config.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log filter (trace, debug, info, warn, error, or an EnvFilter directive).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Print the outcome as JSON on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for bara-sync.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render copy.bara.sky without running anything.
    ///
    /// Validates the config for the chosen workflow and prints the document,
    /// or writes it to `--output`.
    Config(ConfigArgs),

    /// Render copy.bara.sky and run a workflow in the container.
    ///
    /// The document is written to the host config path, mounted into the
    /// container, and the container's exit code decides the outcome.
    Run(RunArgs),

    /// Pull the Copybara container image.
    Pull(PullArgs),
}

/// SSH key shared by `config` and `run`.
#[derive(Args, Debug, Clone, Default)]
pub struct SshKeyArg {
    /// SSH private key content. When non-blank, repositories use SSH URLs.
    #[arg(long, env = "BARA_SYNC_SSH_KEY", hide_env_values = true)]
    pub ssh_key: Option<String>,
}

/// Arguments for the `config` command.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Workflow to validate for (init, push, pr, or a custom name).
    #[arg(short, long, default_value = "push")]
    pub workflow: String,

    #[command(flatten)]
    pub key: SshKeyArg,

    /// Write the document here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Workflow to run. Defaults to `workflow` from the config file.
    pub workflow: Option<String>,

    /// Source reference for the `pr` workflow. Defaults to `pr_number`.
    #[arg(long = "ref")]
    pub source_ref: Option<String>,

    /// Extra Copybara option (repeatable).
    #[arg(long = "option", allow_hyphen_values = true)]
    pub option: Vec<String>,

    /// Extra Copybara options as one shell-quoted string.
    #[arg(long, allow_hyphen_values = true)]
    pub options: Option<String>,

    #[command(flatten)]
    pub key: SshKeyArg,

    /// Print the docker command instead of running it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `pull` command.
#[derive(Parser, Debug)]
pub struct PullArgs {
    /// Print the docker command instead of running it.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

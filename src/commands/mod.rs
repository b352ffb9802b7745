//! Command implementations for bara-sync.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod pull;
mod render;
pub mod report;
mod run;

use crate::cli::{Cli, Command};
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Config(args) => render::cmd_config(&cli.config, args),
        Command::Run(args) => run::cmd_run(&cli.config, args, cli.json),
        Command::Pull(args) => pull::cmd_pull(&cli.config, args),
    }
}
